use kitchencalc_core::Engine;

/// Shared, read-only request state. The engine holds no mutable data, so
/// handlers borrow it without locking.
pub struct AppState {
    engine: Engine,
}

impl AppState {
    pub fn new(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }
}
