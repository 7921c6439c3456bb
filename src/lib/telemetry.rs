use std::fmt::Display;

use crate::driver::ServoDriver;
use crate::ids::ServoId;

/// Steps per full turn of the position encoder.
pub const STEPS_PER_TURN: f64 = 4096.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    PositionServo,
    ConstantSpeedMotor,
    PwmOpenLoop,
    StepServo,
    Unknown(u8),
}

impl From<u8> for Mode {
    fn from(value: u8) -> Self {
        match value {
            0 => Mode::PositionServo,
            1 => Mode::ConstantSpeedMotor,
            2 => Mode::PwmOpenLoop,
            3 => Mode::StepServo,
            other => Mode::Unknown(other),
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::PositionServo => "Position Servo".fmt(f),
            Mode::ConstantSpeedMotor => "Constant Speed Motor".fmt(f),
            Mode::PwmOpenLoop => "PWM Open-Loop".fmt(f),
            Mode::StepServo => "Step Servo".fmt(f),
            Mode::Unknown(value) => write!(f, "Unknown ({})", value),
        }
    }
}

pub fn position_degrees(steps: u16) -> f64 {
    f64::from(steps) / STEPS_PER_TURN * 360.0
}

/// One point-in-time reading. A field the servo did not answer for is `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Telemetry {
    pub position: Option<u16>,
    pub voltage: Option<f64>,
    pub temperature: Option<u8>,
    pub mode: Option<Mode>,
    pub load: Option<f64>,
}

impl Telemetry {
    pub fn read(driver: &mut dyn ServoDriver, id: ServoId) -> Self {
        Telemetry {
            position: driver.read_position(id),
            voltage: driver.read_voltage(id),
            temperature: driver.read_temperature(id),
            mode: driver.read_mode(id).map(Mode::from),
            load: driver.read_load(id),
        }
    }

    /// Indented field lines for the plain report.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if let Some(position) = self.position {
            lines.push(format!(
                "  Position:    {} steps ({:.1}°)",
                position,
                position_degrees(position)
            ));
        }
        if let Some(voltage) = self.voltage {
            lines.push(format!("  Voltage:     {:.1} V", voltage));
        }
        if let Some(temperature) = self.temperature {
            lines.push(format!("  Temperature: {} °C", temperature));
        }
        if let Some(mode) = self.mode {
            lines.push(format!("  Mode:        {}", mode));
        }
        if let Some(load) = self.load {
            lines.push(format!("  Load:        {:.1}%", load));
        }

        lines
    }

    pub fn to_json(&self, id: ServoId) -> json::JsonValue {
        let mut obj = json::JsonValue::new_object();
        obj["id"] = id.value().into();

        if let Some(position) = self.position {
            obj["position"] = position.into();
            obj["degrees"] = position_degrees(position).into();
        }
        if let Some(voltage) = self.voltage {
            obj["voltage"] = voltage.into();
        }
        if let Some(temperature) = self.temperature {
            obj["temperature"] = temperature.into();
        }
        if let Some(mode) = self.mode {
            obj["mode"] = mode.to_string().into();
        }
        if let Some(load) = self.load {
            obj["load"] = load.into();
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_names() {
        assert_eq!(Mode::from(0).to_string(), "Position Servo");
        assert_eq!(Mode::from(1).to_string(), "Constant Speed Motor");
        assert_eq!(Mode::from(2).to_string(), "PWM Open-Loop");
        assert_eq!(Mode::from(3).to_string(), "Step Servo");
        assert_eq!(Mode::from(9).to_string(), "Unknown (9)");
    }

    #[test]
    fn degrees_from_steps() {
        assert_eq!(position_degrees(0), 0.0);
        assert_eq!(position_degrees(1024), 90.0);
        assert_eq!(position_degrees(2048), 180.0);
    }

    #[test]
    fn lines_skip_missing_fields() {
        let reading = Telemetry {
            position: Some(2048),
            temperature: Some(31),
            ..Default::default()
        };

        assert_eq!(
            reading.lines(),
            vec![
                "  Position:    2048 steps (180.0°)".to_string(),
                "  Temperature: 31 °C".to_string(),
            ]
        );
    }

    #[test]
    fn json_omits_missing_fields() {
        let reading = Telemetry {
            voltage: Some(12.5),
            mode: Some(Mode::StepServo),
            ..Default::default()
        };
        let id = ServoId::new(4).unwrap();

        assert_eq!(
            reading.to_json(id).dump(),
            r#"{"id":4,"voltage":12.5,"mode":"Step Servo"}"#
        );
    }

    #[test]
    fn json_keeps_tenths_exact() {
        let reading = Telemetry {
            voltage: Some(f64::from(121u8) / 10.0),
            load: Some(-(f64::from(123u16) / 10.0)),
            ..Default::default()
        };
        let id = ServoId::new(4).unwrap();

        assert_eq!(
            reading.to_json(id).dump(),
            r#"{"id":4,"voltage":12.1,"load":-12.3}"#
        );
    }
}
