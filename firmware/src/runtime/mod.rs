use cortex_m::interrupt;
use cortex_m::register::primask;
use critical_section::{self, RawRestoreState};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_stm32 as hal;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};

use crate::board::HardwareBoard;
use crate::telemetry::LogTelemetry;

mod game_task;

critical_section::set_impl!(InterruptCriticalSection);

struct InterruptCriticalSection;

unsafe impl critical_section::Impl for InterruptCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        let primask = primask::read();
        interrupt::disable();
        primask.is_active()
    }

    unsafe fn release(restore_state: RawRestoreState) {
        if restore_state {
            unsafe {
                interrupt::enable();
            }
        }
    }
}

// Pin map (STM32G0B1KE):
//   S2..S5            PB3..PB6, active-low, EXTI3..EXTI6
//   LED3..LED6        PA6..PA9
//   LED1 power lamp   PA0
//   piezo             PA1
#[embassy_executor::main]
pub async fn main(spawner: Spawner) {
    let config = hal::Config::default();
    let hal::Peripherals {
        PA0,
        PA1,
        PA6,
        PA7,
        PA8,
        PA9,
        PB3,
        PB4,
        PB5,
        PB6,
        EXTI3,
        EXTI4,
        EXTI5,
        EXTI6,
        ..
    } = hal::init(config);

    let board = HardwareBoard::new(
        [
            ExtiInput::new(PB3, EXTI3, Pull::Up),
            ExtiInput::new(PB4, EXTI4, Pull::Up),
            ExtiInput::new(PB5, EXTI5, Pull::Up),
            ExtiInput::new(PB6, EXTI6, Pull::Up),
        ],
        [
            Output::new(PA6, Level::Low, Speed::Low),
            Output::new(PA7, Level::Low, Speed::Low),
            Output::new(PA8, Level::Low, Speed::Low),
            Output::new(PA9, Level::Low, Speed::Low),
        ],
        Output::new(PA0, Level::Low, Speed::Low),
        Output::new(PA1, Level::Low, Speed::Low),
    );

    defmt::info!("boot: board configured");

    spawner
        .spawn(game_task::run(board, LogTelemetry::new()))
        .expect("failed to spawn game task");
}
