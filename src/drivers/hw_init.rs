//! One-shot GPIO initialisation and raw pin access.
//!
//! Configures the LED bank as outputs (driven low) and the button and
//! switch banks as pulled-down inputs using raw ESP-IDF sys calls.
//! Called once from `main()` before the scheduler starts; a failure here
//! is fatal.
//!
//! Off target the pins live in a simulated level register so the GPIO
//! adapter and the full task topology can run on the host.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

fn bank_mask(bank: &[i32]) -> u64 {
    bank.iter().fold(0, |mask, &pin| mask | 1u64 << pin)
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the scheduler starts; single-threaded.
    unsafe {
        init_gpio_outputs()?;
        init_gpio_inputs()?;
    }
    log::info!("hw_init: LEDs, buttons, switches configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): {} pins simulated", bank_mask(&all_pins()).count_ones());
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn all_pins() -> [i32; 12] {
    let mut all = [0; 12];
    all[..4].copy_from_slice(&pins::LED_GPIOS);
    all[4..8].copy_from_slice(&pins::BUTTON_GPIOS);
    all[8..].copy_from_slice(&pins::SWITCH_GPIOS);
    all
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: bank_mask(&pins::LED_GPIOS),
        mode: gpio_mode_t_GPIO_MODE_OUTPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }

    for &pin in &pins::LED_GPIOS {
        unsafe { gpio_set_level(pin, 0) };
    }
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an output pin configured in
    // init_gpio_outputs(); LED writes are serialized by the blink controller.
    unsafe { gpio_set_level(pin, if high { 1 } else { 0 }); }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(pin: i32, high: bool) {
    sim::set_level(pin, high);
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: bank_mask(&pins::BUTTON_GPIOS) | bank_mask(&pins::SWITCH_GPIOS),
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
        intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 { return Err(HwInitError::GpioConfigFailed(ret)); }
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim::level(pin)
}

// ── Host simulation ───────────────────────────────────────────

/// Simulated pin levels, one bit per GPIO number.
#[cfg(not(target_os = "espidf"))]
pub mod sim {
    use core::sync::atomic::{AtomicU64, Ordering};

    static LEVELS: AtomicU64 = AtomicU64::new(0);

    pub fn set_level(pin: i32, high: bool) {
        let bit = 1u64 << pin;
        if high {
            LEVELS.fetch_or(bit, Ordering::AcqRel);
        } else {
            LEVELS.fetch_and(!bit, Ordering::AcqRel);
        }
    }

    pub fn level(pin: i32) -> bool {
        LEVELS.load(Ordering::Acquire) & (1u64 << pin) != 0
    }

    /// Drive a whole bank from the low bits of `value`.
    pub fn set_bank(bank: &[i32], value: u8) {
        for (i, &pin) in bank.iter().enumerate() {
            set_level(pin, value & (1 << i) != 0);
        }
    }

    /// Read a whole bank into the low bits.
    pub fn bank(bank: &[i32]) -> u8 {
        bank.iter()
            .enumerate()
            .fold(0, |acc, (i, &pin)| if level(pin) { acc | 1 << i } else { acc })
    }
}
