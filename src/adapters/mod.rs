// Adapters layer: concrete implementations of the domain ports (upstream http, clock).

pub mod clock;
pub mod http;

pub use clock::SystemClock;
pub use http::NasaClient;
