//! Tests for the export module

use serde_json::json;
use trackalign::{write_gpx, write_tcx, Activity, Position, TrackPoint};

fn sample_activity() -> Activity {
    let doc = json!({
        "trackid": 1_600_000_000,
        "end_time": 1_600_000_600,
        "run_time": 600,
        "avg_heart_rate": 121.5,
        "max_heart_rate": 150,
        "min_heart_rate": 90,
        "calorie": 350.2,
        "total_step": 4200,
        "time": "0;5",
        "longitude_latitude": "5100000000,-12800000;100,-50",
        "altitude": "10000;10050",
        "heart_rate": "0,120;5,-120",
        "gait": "0,9,90,0;5,9,91,170",
        "distance": "0,0;5,30",
    });
    Activity::from_json(&doc).unwrap()
}

fn sample_points() -> Vec<TrackPoint> {
    vec![
        TrackPoint {
            time: 1_600_000_000,
            position: Position {
                lat: 51.0,
                lon: -0.128,
                alt: 100.0,
            },
            heart_rate: 120,
            stride: 90,
            cadence: 0,
            distance: 0,
        },
        TrackPoint {
            time: 1_600_000_005,
            position: Position {
                lat: 51.000001,
                lon: -0.1285,
                alt: 100.5,
            },
            heart_rate: 0,
            stride: 91,
            cadence: 170,
            distance: 18,
        },
    ]
}

fn render<F>(write: F) -> String
where
    F: FnOnce(&mut Vec<u8>) -> trackalign::Result<()>,
{
    let mut buffer = Vec::new();
    write(&mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[test]
fn test_gpx_document_structure() {
    let activity = sample_activity();
    let xml = render(|w| write_gpx(w, &activity, &sample_points()));

    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    assert!(xml.contains(r#"<gpx version="1.1""#));
    assert!(xml.contains("<time>2020-09-13T12:26:40</time>"));
    assert!(xml.contains(r#"<trkpt lat="51" lon="-0.128">"#));
    assert!(xml.contains("<ele>100</ele>"));
    assert!(xml.trim_end().ends_with("</gpx>"));
}

#[test]
fn test_gpx_omits_zero_heart_rate_and_cadence() {
    let activity = sample_activity();
    let xml = render(|w| write_gpx(w, &activity, &sample_points()));

    // The first point carries heart rate but no cadence; the second the
    // reverse. Both trackpoints are still written.
    assert_eq!(xml.matches("<trkpt").count(), 2);
    assert_eq!(xml.matches("<gpxtpx:hr>120</gpxtpx:hr>").count(), 1);
    assert_eq!(xml.matches("<gpxtpx:TrackPointExtension/>").count(), 1);
    assert_eq!(
        xml.matches("<gpxdata:cadence>170</gpxdata:cadence>").count(),
        1
    );
}

#[test]
fn test_tcx_lap_summary_from_activity_scalars() {
    let activity = sample_activity();
    let xml = render(|w| write_tcx(w, &activity, &sample_points()));

    assert!(xml.contains("<TrainingCenterDatabase"));
    assert!(xml.contains("<Id>2020-09-13T12:26:40Z</Id>"));
    assert!(xml.contains(r#"<Lap StartTime="2020-09-13T12:26:40Z">"#));
    assert!(xml.contains("<TotalTimeSeconds>600.0</TotalTimeSeconds>"));
    assert!(xml.contains("<DistanceMeters>30.0</DistanceMeters>"));
    assert!(xml.contains("<Calories>350</Calories>"));
    assert!(xml.contains("<Value>121</Value>"));
}

#[test]
fn test_tcx_omits_zero_subfields_but_keeps_points() {
    let activity = sample_activity();
    let xml = render(|w| write_tcx(w, &activity, &sample_points()));

    assert_eq!(xml.matches("<Trackpoint>").count(), 2);
    // Zero distance on the first point, zero heart rate on the second.
    assert_eq!(
        xml.matches("<DistanceMeters>18.0</DistanceMeters>").count(),
        1
    );
    assert_eq!(xml.matches("<Value>120</Value>").count(), 1);
    assert!(xml.contains(r#"<HeartRateBpm xsi:type="HeartRateInBeatsPerMinute_t"/>"#));
    assert_eq!(xml.matches("<RunCadence>170</RunCadence>").count(), 1);
    assert!(xml.contains("<Time>2020-09-13T12:26:45Z</Time>"));
}
