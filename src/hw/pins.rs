// SPDX-License-Identifier: MIT

//! Pin assignments for the obstacle-sensor node.
//!
//! | Pin  | Function |
//! | ---- | -------- |
//! | PA5  | HC-SR04 trigger (push-pull output, level-shifted on the board) |
//! | PA6  | HC-SR04 echo, TIM3_CH1 input capture (AF2) |
//! | PA9  | USART1 TX (debug terminal) |
//! | PA10 | USART1 RX |
//! | PA11 | CAN1 RX |
//! | PA12 | CAN1 TX |
//! | PD8  | Red proximity indicator LED |

use stm32f7xx_hal::{
    gpio::{gpioa, gpiod, Alternate, Output, PushPull},
    pac,
    prelude::*,
};

/// All board pins. Construct once at startup:
///
/// ```ignore
/// let pins = BoardPins::new(dp.GPIOA, dp.GPIOD);
/// ```
pub struct BoardPins {
    pub ranging: RangingPins,
    pub led: LedPins,
    pub usart1: Usart1Pins,
    pub can1: Can1Pins,
}

/// Ultrasonic rangefinder lines.
pub struct RangingPins {
    pub trigger: gpioa::PA5<Output<PushPull>>,
    pub echo: gpioa::PA6<Alternate<2>>,
}

pub struct LedPins {
    pub red: gpiod::PD8<Output<PushPull>>,
}

pub struct Usart1Pins {
    pub tx: gpioa::PA9<Alternate<7>>,
    pub rx: gpioa::PA10<Alternate<7>>,
}

pub struct Can1Pins {
    pub tx: gpioa::PA12<Alternate<9>>,
    pub rx: gpioa::PA11<Alternate<9>>,
}

impl BoardPins {
    /// Create all named pins from raw GPIO peripherals.
    pub fn new(gpioa: pac::GPIOA, gpiod: pac::GPIOD) -> Self {
        let gpioa = gpioa.split();
        let gpiod = gpiod.split();

        Self {
            ranging: RangingPins {
                trigger: gpioa.pa5.into_push_pull_output(),
                echo: gpioa.pa6.into_alternate::<2>(),
            },

            led: LedPins {
                red: gpiod.pd8.into_push_pull_output(),
            },

            usart1: Usart1Pins {
                tx: gpioa.pa9.into_alternate::<7>(),
                rx: gpioa.pa10.into_alternate::<7>(),
            },

            can1: Can1Pins {
                tx: gpioa.pa12.into_alternate::<9>(),
                rx: gpioa.pa11.into_alternate::<9>().internal_pull_up(true),
            },
        }
    }
}
