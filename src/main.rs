#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;
use rtic::app;

use led_shield_clock::input::ButtonLevels;
use led_shield_clock::multiplex::{self, RefreshConsumer, RefreshProducer, RefreshQueue};
use led_shield_clock::{
    DisplayMode, DisplayRenderer, ElapsedTime, InputHandler, Multiplexer, ShieldConfig,
    ShiftRegister, VoltageSource,
};

/// Full scale of the RP2040's 12-bit ADC
const ADC_FULL_SCALE: f32 = 4095.0;

type PotPin = rp_pico::hal::adc::AdcPin<
    rp_pico::hal::gpio::Pin<
        rp_pico::hal::gpio::bank0::Gpio26,
        rp_pico::hal::gpio::FunctionSioInput,
        rp_pico::hal::gpio::PullNone,
    >,
>;

/// Potentiometer on ADC0
pub struct Pot {
    adc: rp_pico::hal::adc::Adc,
    pin: PotPin,
}

impl VoltageSource for Pot {
    fn sample(&mut self) -> f32 {
        use embedded_hal::adc::OneShot;

        let raw: u16 = OneShot::read(&mut self.adc, &mut self.pin).unwrap_or(0);
        f32::from(raw) / ADC_FULL_SCALE
    }
}

#[app(device = rp_pico::hal::pac, peripherals = true)]
mod app {
    use super::*;
    use embedded_hal::digital::v2::{InputPin, PinState};
    use rp_pico::hal::{
        adc::{Adc, AdcPin},
        clocks::init_clocks_and_plls,
        fugit::{ExtU32, MicrosDurationU32},
        gpio::{
            bank0::{Gpio10, Gpio11, Gpio12, Gpio14, Gpio15},
            FunctionSioInput, FunctionSioOutput, Pin, PullDown, PullUp,
        },
        sio::Sio,
        timer::{Alarm, Alarm0, Alarm1, Timer},
        watchdog::Watchdog,
    };

    type DataPin = Pin<Gpio10, FunctionSioOutput, PullDown>;
    type ClockPin = Pin<Gpio11, FunctionSioOutput, PullDown>;
    type LatchPin = Pin<Gpio12, FunctionSioOutput, PullDown>;
    type ResetButton = Pin<Gpio14, FunctionSioInput, PullUp>;
    type ModeButton = Pin<Gpio15, FunctionSioInput, PullUp>;
    type Display = ShiftRegister<DataPin, ClockPin, LatchPin>;

    // Shared resources (accessed by multiple tasks)
    #[shared]
    struct Shared {
        clock: ElapsedTime,
    }

    // Local resources (accessed by single tasks)
    #[local]
    struct Local {
        second_alarm: Alarm0,
        second_period: MicrosDurationU32,
        refresh_alarm: Alarm1,
        refresh_period: MicrosDurationU32,
        refresh_tx: RefreshProducer<'static>,
        refresh_rx: RefreshConsumer<'static>,
        mux: Multiplexer,
        input: InputHandler,
        display: Display,
        reset_button: ResetButton,
        mode_button: ModeButton,
        pot: Pot,
    }

    #[init(local = [refresh_queue: RefreshQueue = RefreshQueue::new()])]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let config = ShieldConfig::default();
        defmt::unwrap!(config.validate());

        let mut pac = ctx.device;
        let mut watchdog = Watchdog::new(pac.WATCHDOG);
        let sio = Sio::new(pac.SIO);

        let external_xtal_freq_hz = 12_000_000u32;
        let clocks = init_clocks_and_plls(
            external_xtal_freq_hz,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
        .unwrap();

        let pins = rp_pico::Pins::new(
            pac.IO_BANK0,
            pac.PADS_BANK0,
            sio.gpio_bank0,
            &mut pac.RESETS,
        );

        let display = ShiftRegister::new(
            pins.gpio10.into_push_pull_output(),
            pins.gpio11.into_push_pull_output(),
            pins.gpio12.into_push_pull_output(),
        );
        let reset_button = pins.gpio14.into_pull_up_input();
        let mode_button = pins.gpio15.into_pull_up_input();

        let adc = Adc::new(pac.ADC, &mut pac.RESETS);
        let pot = Pot {
            adc,
            pin: AdcPin::new(pins.gpio26.into_floating_input()).unwrap(),
        };

        let second_period = config.second_tick_us.micros();
        let refresh_period = config.refresh_tick_us.micros();

        let mut timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
        let mut second_alarm = timer.alarm_0().unwrap();
        second_alarm.schedule(second_period).unwrap();
        second_alarm.enable_interrupt();

        let mut refresh_alarm = timer.alarm_1().unwrap();
        refresh_alarm.schedule(refresh_period).unwrap();
        refresh_alarm.enable_interrupt();

        let (refresh_tx, refresh_rx) = ctx.local.refresh_queue.split();

        defmt::info!(
            "shield up: wrap {}s, refresh {}us, policy {}",
            config.wrap_seconds,
            config.refresh_tick_us,
            config.mode_policy
        );

        (
            Shared {
                clock: ElapsedTime::with_wrap(config.wrap_seconds),
            },
            Local {
                second_alarm,
                second_period,
                refresh_alarm,
                refresh_period,
                refresh_tx,
                refresh_rx,
                mux: Multiplexer::new(DisplayRenderer::new(
                    config.reference_volts,
                    config.suppress_leading_zero,
                )),
                input: InputHandler::new(config.mode_policy),
                display,
                reset_button,
                mode_button,
                pot,
            },
            init::Monotonics(),
        )
    }

    // Hardware Task: elapsed-time tick (1 Hz)
    #[task(binds = TIMER_IRQ_0, priority = 1, shared = [clock], local = [second_alarm, second_period])]
    fn second_tick(mut ctx: second_tick::Context) {
        ctx.local.second_alarm.clear_interrupt();
        ctx.local.second_alarm.schedule(*ctx.local.second_period).unwrap();

        ctx.shared.clock.lock(|c| c.advance());
    }

    // Hardware Task: multiplex refresh tick (2 ms)
    #[task(binds = TIMER_IRQ_1, priority = 1, local = [refresh_alarm, refresh_period, refresh_tx])]
    fn refresh_tick(ctx: refresh_tick::Context) {
        ctx.local.refresh_alarm.clear_interrupt();
        ctx.local.refresh_alarm.schedule(*ctx.local.refresh_period).unwrap();

        // A refresh the display loop has not taken yet absorbs this one
        multiplex::signal_refresh(ctx.local.refresh_tx);
    }

    // Display loop: polls the reset button continuously and redraws one
    // digit per refresh tick
    #[idle(
        shared = [clock],
        local = [refresh_rx, mux, input, display, reset_button, mode_button, pot]
    )]
    fn idle(mut ctx: idle::Context) -> ! {
        let mut mode = DisplayMode::Time;

        loop {
            let levels = ButtonLevels {
                reset: PinState::from(ctx.local.reset_button.is_high().unwrap_or(true)),
                mode: PinState::from(ctx.local.mode_button.is_high().unwrap_or(true)),
            };

            if ctx.local.input.poll_reset(levels.reset) {
                ctx.shared.clock.lock(|c| c.reset());
                defmt::info!("timer reset");
            }

            if !multiplex::take_refresh(ctx.local.refresh_rx) {
                continue;
            }

            let polled = ctx.local.input.poll_mode(levels.mode);
            if polled != mode {
                defmt::info!("mode {}", polled);
                mode = polled;
            }

            let time = ctx.shared.clock.lock(|c| *c);
            if ctx
                .local
                .mux
                .refresh(mode, &time, ctx.local.pot, ctx.local.display)
                .is_err()
            {
                defmt::warn!("frame write failed at digit {}", ctx.local.mux.cursor());
            }
        }
    }
}
