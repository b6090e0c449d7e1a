pub mod can;
pub mod echo_timer;
pub mod led;
pub mod pins;
pub mod usart;

pub use can::CanBus;
pub use echo_timer::EchoTimer;
pub use led::Led;
pub use pins::BoardPins;
pub use usart::DebugUsart;
