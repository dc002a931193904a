//! STM32G0 implementation of the game's board traits.
//!
//! Buttons are active-low with internal pull-ups and double as EXTI wake
//! sources. LEDs, the power lamp and the piezo are plain push-pull outputs;
//! tones are bit-banged by toggling the piezo line between busy-waits.

#![cfg(target_os = "none")]

use core::future::Future;
use core::mem::MaybeUninit;
use core::pin::pin;
use core::task::{Context, Waker};

use cortex_m::peripheral::SCB;
use embassy_futures::select::select4;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Output;
use embassy_time::{Instant, block_for};
use simon_core::Symbol;
use simon_core::board::{Beeper, ButtonInputs, Clock, Indicators, SeedCell, Wake, WakeSource};

use super::to_embassy;

/// Carry byte kept in RAM the startup code never initialises, so it survives
/// the reset performed on wake. After a cold power-on it holds whatever the
/// SRAM settled to, which is fine for seed entropy.
#[unsafe(link_section = ".uninit.SIMON_SEED")]
static mut SEED_CARRY: MaybeUninit<u8> = MaybeUninit::uninit();

/// Concrete board wired to the MCU pins.
pub struct HardwareBoard {
    buttons: [ExtiInput<'static>; 4],
    leds: [Output<'static>; 4],
    lamp: Output<'static>,
    beeper: Output<'static>,
}

impl HardwareBoard {
    /// Builds the board from configured pins, ordered S2..S5 and LED3..LED6.
    pub fn new(
        buttons: [ExtiInput<'static>; 4],
        leds: [Output<'static>; 4],
        lamp: Output<'static>,
        beeper: Output<'static>,
    ) -> Self {
        Self {
            buttons,
            leds,
            lamp,
            beeper,
        }
    }
}

impl ButtonInputs for HardwareBoard {
    fn is_pressed(&mut self, symbol: Symbol) -> bool {
        self.buttons[symbol.as_index()].is_low()
    }
}

impl Indicators for HardwareBoard {
    fn set_led(&mut self, symbol: Symbol, lit: bool) {
        self.leds[symbol.as_index()].set_level(lit.into());
    }

    fn set_power_lamp(&mut self, lit: bool) {
        self.lamp.set_level(lit.into());
    }
}

impl Beeper for HardwareBoard {
    fn toggle(&mut self) {
        self.beeper.toggle();
    }

    fn silence(&mut self) {
        self.beeper.set_low();
    }
}

impl Clock for HardwareBoard {
    fn delay(&mut self, duration: core::time::Duration) {
        block_for(to_embassy(duration));
    }

    fn ticks(&mut self) -> u8 {
        Instant::now().as_ticks().to_le_bytes()[0]
    }
}

impl SeedCell for HardwareBoard {
    fn load(&mut self) -> u8 {
        // SAFETY: single-threaded access; the byte is read as raw memory.
        unsafe { (&raw const SEED_CARRY).cast::<u8>().read_volatile() }
    }

    fn store(&mut self, value: u8) {
        // SAFETY: single-threaded access.
        unsafe { (&raw mut SEED_CARRY).cast::<u8>().write_volatile(value) }
    }
}

impl WakeSource for HardwareBoard {
    /// Halts until a falling edge on one of `lines`, then resets the MCU.
    fn sleep_until_wake(&mut self, lines: &[Symbol]) -> Wake {
        let armed = Symbol::ALL.map(|symbol| lines.contains(&symbol));
        defmt::info!("power: halting, wake lines armed={}", armed);

        let [s2, s3, s4, s5] = &mut self.buttons;
        let mut edge = pin!(select4(
            falling_edge(s2, armed[0]),
            falling_edge(s3, armed[1]),
            falling_edge(s4, armed[2]),
            falling_edge(s5, armed[3]),
        ));

        // The EXTI interrupt itself pulls the core out of WFI; any other
        // interrupt just re-polls, which re-arms the lines, and halts again.
        let mut cx = Context::from_waker(Waker::noop());
        while edge.as_mut().poll(&mut cx).is_pending() {
            cortex_m::asm::wfi();
        }

        defmt::info!("power: wake edge, resetting");
        SCB::sys_reset()
    }
}

async fn falling_edge(button: &mut ExtiInput<'static>, armed: bool) {
    if armed {
        button.wait_for_falling_edge().await;
    } else {
        core::future::pending::<()>().await;
    }
}
