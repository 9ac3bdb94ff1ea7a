use anyhow::Result;
use std::fs;
use tempfile::tempdir;
use voyager_parser::{
    export_to_json, parse_structured, parse_with_fallback, validate_itinerary,
    ManualItineraryParser, ParserKind, ParsingConfig,
};

const TWO_DAYS: &str = "Trip to Amsterdam for 2 days\nDay 1: Visit Van Gogh Museum\nDay 2: Anne Frank House";

#[test]
fn test_config_file_drives_thresholds() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("voyager").join("parsing.json");
    fs::create_dir_all(path.parent().unwrap())?;
    fs::write(&path, r#"{ "min_activity_length": 20 }"#)?;

    let parser = ManualItineraryParser::from_config_file(&path)?;
    assert_eq!(parser.config().min_activity_length, 20);

    let result = parser.parse_itinerary_text(TWO_DAYS)?;
    assert_eq!(result.itinerary()[0].activities(), ["Visit Van Gogh Museum"]);
    // "Anne Frank House" is too short under this config
    assert_eq!(result.itinerary()[1].activities(), ["Free time"]);
    Ok(())
}

#[test]
fn test_saved_config_is_used_on_next_load() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("parsing.json");
    let config = ParsingConfig {
        max_activities_per_day: 1,
        ..ParsingConfig::default()
    };
    config.save(&path)?;

    let parser = ManualItineraryParser::from_config_file(&path)?;
    let result = parser.parse_itinerary_text("Day 1\n- Harbour cruise\n- Fish market\n- Old fortress")?;
    assert_eq!(result.itinerary()[0].activities(), ["Harbour cruise"]);
    Ok(())
}

#[test]
fn test_invalid_config_file_is_rejected() -> Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("parsing.json");
    fs::write(&path, r#"{ "default_day": 0 }"#)?;
    assert!(ManualItineraryParser::from_config_file(&path).is_err());

    fs::write(&path, "not json at all")?;
    assert!(ManualItineraryParser::from_config_file(&path).is_err());
    Ok(())
}

#[test]
fn test_manual_output_reads_back_as_structured() -> Result<()> {
    let parser = ManualItineraryParser::new();
    let original = parser.parse_itinerary_text(TWO_DAYS)?;

    let json = serde_json::to_string_pretty(&original)?;
    let fenced = format!("```json\n{}\n```", json);
    let reread = parse_structured(&fenced)?;

    assert_eq!(reread, original);
    assert_eq!(reread.language(), Some("en"));
    assert_eq!(reread.metadata().unwrap().parser_used(), ParserKind::Manual);

    // a stamped record keeps its id and time through JSON
    let stamped = original.stamped();
    let reread = parse_structured(&serde_json::to_string(&stamped)?)?;
    assert!(reread.metadata().and_then(|m| m.request_id()).is_some());
    assert_eq!(reread, stamped);
    Ok(())
}

#[test]
fn test_broken_json_falls_back_to_text() -> Result<()> {
    let parser = ManualItineraryParser::new();
    let result = parse_with_fallback("Day 1: Colosseum tour {broken", &parser)?;
    assert_eq!(result.metadata().unwrap().parser_used(), ParserKind::Manual);
    assert_eq!(result.itinerary().len(), 1);
    assert!(result.itinerary()[0].activities()[0].starts_with("Colosseum tour"));
    Ok(())
}

#[test]
fn test_exported_days_validate() -> Result<()> {
    let parser = ManualItineraryParser::new();
    let days = parser.parse_itinerary_text(TWO_DAYS)?.into_days();
    assert!(validate_itinerary(&days));

    let json = export_to_json(&days)?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&json)?;
    assert_eq!(values.len(), 2);
    assert_eq!(values[1]["day"], 2);
    assert_eq!(values[1]["location"], "Amsterdam");
    Ok(())
}
