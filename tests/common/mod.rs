use std::sync::OnceLock;

use product_scraper::observability::{init_tracing, LogConfig, LogTarget};

static INIT: OnceLock<()> = OnceLock::new();

pub fn init_test_tracing() {
    INIT.get_or_init(|| {
        init_tracing(&LogConfig {
            default_filter: "product_scraper=debug".to_string(),
            target: LogTarget::TestWriter,
        });
    });
}
