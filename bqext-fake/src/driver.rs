use crate::FakeConnection;
use bqext_core::Driver;

/// In memory query service, connected through `fake://<project>/<dataset>`.
#[derive(Default, Debug, Clone, Copy)]
pub struct FakeDriver {}

impl FakeDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for FakeDriver {
    type Connection = FakeConnection;

    const NAME: &'static str = "fake";
}
