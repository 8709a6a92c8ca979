use std::sync::Arc;

use model::config::Config;
use model::fleet::Fleet;
use model::weights::Weights;

pub(crate) struct TestData {
    pub(crate) fleet: Fleet,
    pub(crate) weights: Weights,
    pub(crate) config: Arc<Config>,
}

pub(crate) fn init_test_data() -> TestData {
    TestData {
        fleet: Fleet::standard(25),
        weights: Weights::default(),
        config: Arc::new(Config::default()),
    }
}
