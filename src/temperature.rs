use std::{fmt, str::FromStr};

// 12-bit ADC against a 3.3V reference
const ADC_FULL_SCALE: f32 = 4095.0;
const ADC_REFERENCE_VOLTS: f32 = 3.3;

// Analog sensor transfer function: V = 1.3605 - 0.01177 * T
const SENSOR_OFFSET_VOLTS: f32 = 1.3605;
const SENSOR_VOLTS_PER_DEGREE: f32 = -11.77 / 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TemperatureUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            other => anyhow::bail!("unknown temperature unit `{other}`"),
        }
    }
}

/// Converts an (averaged) raw ADC reading into a temperature.
pub fn adc_to_temperature(counts: f32, unit: TemperatureUnit) -> f32 {
    let volts = counts / ADC_FULL_SCALE * ADC_REFERENCE_VOLTS;
    let celsius = (volts - SENSOR_OFFSET_VOLTS) / SENSOR_VOLTS_PER_DEGREE;
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * (9.0 / 5.0) + 32.0,
    }
}
