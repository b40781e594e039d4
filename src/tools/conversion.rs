//! Volume Conversion Tools

use serde::Serialize;

use crate::units::{convert, to_gal, to_ml, VolUnit};

/// A value expressed in one unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedValue {
    pub value: f64,
    pub unit: VolUnit,
}

/// Response for convert_volume
#[derive(Debug, Serialize)]
pub struct ConvertVolumeResponse {
    pub value: f64,
    pub unit: VolUnit,
    pub milliliters: f64,
    pub gallons: f64,
    /// Present when a target unit was requested
    pub converted: Option<ConvertedValue>,
    /// The value in every supported unit
    pub all_units: Vec<ConvertedValue>,
}

/// Parse a unit tag, mapping the error to a tool message
pub fn parse_vol_unit(unit: &str) -> Result<VolUnit, String> {
    unit.parse::<VolUnit>().map_err(|e| e.to_string())
}

/// Convert a volume given as a unit string into every supported unit
pub fn convert_volume(value: f64, unit: &str, to: Option<&str>) -> Result<ConvertVolumeResponse, String> {
    let unit = parse_vol_unit(unit)?;
    let target = to.map(parse_vol_unit).transpose()?;

    let converted = target.map(|to| ConvertedValue {
        value: convert(value, unit, to),
        unit: to,
    });

    let all_units = VolUnit::ALL
        .iter()
        .map(|&to| ConvertedValue {
            value: convert(value, unit, to),
            unit: to,
        })
        .collect();

    Ok(ConvertVolumeResponse {
        value,
        unit,
        milliliters: to_ml(value, unit),
        gallons: to_gal(value, unit),
        converted,
        all_units,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_volume_gallons() {
        let result = convert_volume(1.0, "gal", Some("L")).unwrap();
        assert_eq!(result.unit, VolUnit::Gallon);
        assert_eq!(result.milliliters, 3785.41);
        assert!((result.gallons - 1.0).abs() < 1e-9);
        let converted = result.converted.unwrap();
        assert_eq!(converted.unit, VolUnit::Liter);
        assert!((converted.value - 3.78541).abs() < 1e-9);
        assert_eq!(result.all_units.len(), 4);
    }

    #[test]
    fn test_convert_volume_without_target() {
        let result = convert_volume(500.0, "ml", None).unwrap();
        assert!(result.converted.is_none());
        assert_eq!(result.milliliters, 500.0);
    }

    #[test]
    fn test_convert_volume_unknown_units() {
        let err = convert_volume(1.0, "cup", None).unwrap_err();
        assert!(err.contains("cup"));
        assert!(convert_volume(1.0, "L", Some("pint")).is_err());
    }

    #[test]
    fn test_response_serializes_unit_tags() {
        let result = convert_volume(2.0, "fl oz", None).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["unit"], "fl oz");
        assert_eq!(json["all_units"][0]["unit"], "mL");
    }
}
