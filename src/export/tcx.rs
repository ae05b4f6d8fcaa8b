//! TCX (Garmin Training Center) serialization.

use std::io::Write;

use crate::activity::Activity;
use crate::error::Result;
use crate::trackpoint::TrackPoint;

use super::iso_timestamp;

/// Write an activity's trackpoints as a TCX document.
///
/// The lap summary comes from the activity's scalar metadata; per-point
/// distance, position, altitude, heart rate, and cadence are written only
/// when non-zero.
pub fn write_tcx<W: Write>(
    writer: &mut W,
    activity: &Activity,
    points: &[TrackPoint],
) -> Result<()> {
    let start = format!("{}Z", iso_timestamp(activity.start_time)?);

    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<TrainingCenterDatabase xmlns="http://www.garmin.com/xmlschemas/TrainingCenterDatabase/v2" xmlns:ns2="http://www.garmin.com/xmlschemas/UserProfile/v2" xmlns:ns4="http://www.garmin.com/xmlschemas/ProfileExtension/v1" xmlns:ns5="http://www.garmin.com/xmlschemas/ActivityGoals/v1" xmlns:tpx="http://www.garmin.com/xmlschemas/ActivityExtension/v2" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    )?;
    writeln!(writer, "  <Activities>")?;
    writeln!(writer, r#"    <Activity Sport="Running">"#)?;
    writeln!(writer, "      <Id>{start}</Id>")?;
    writeln!(writer, r#"      <Lap StartTime="{start}">"#)?;
    writeln!(
        writer,
        "        <TotalTimeSeconds>{:.1}</TotalTimeSeconds>",
        activity.cost_time as f64
    )?;
    writeln!(
        writer,
        "        <DistanceMeters>{:.1}</DistanceMeters>",
        activity.total_distance() as f64
    )?;
    writeln!(
        writer,
        "        <Calories>{}</Calories>",
        activity.calorie as i64
    )?;
    writeln!(writer, "        <AverageHeartRateBpm>")?;
    writeln!(
        writer,
        "          <Value>{}</Value>",
        activity.avg_heart_rate as i64
    )?;
    writeln!(writer, "        </AverageHeartRateBpm>")?;
    writeln!(writer, "        <Track>")?;

    for point in points {
        write_trackpoint(writer, point)?;
    }

    writeln!(writer, "        </Track>")?;
    writeln!(writer, "      </Lap>")?;
    writeln!(writer, "      <Notes>Synced run</Notes>")?;
    writeln!(writer, "    </Activity>")?;
    writeln!(writer, "  </Activities>")?;
    writeln!(writer, "</TrainingCenterDatabase>")?;
    Ok(())
}

fn write_trackpoint<W: Write>(writer: &mut W, point: &TrackPoint) -> Result<()> {
    writeln!(writer, "          <Trackpoint>")?;
    writeln!(
        writer,
        "            <Time>{}Z</Time>",
        iso_timestamp(point.time)?
    )?;
    if point.distance != 0 {
        writeln!(
            writer,
            "            <DistanceMeters>{:.1}</DistanceMeters>",
            point.distance as f64
        )?;
    }
    if point.position.lat != 0.0 && point.position.lon != 0.0 {
        writeln!(writer, "            <Position>")?;
        writeln!(
            writer,
            "              <LatitudeDegrees>{}</LatitudeDegrees>",
            point.position.lat
        )?;
        writeln!(
            writer,
            "              <LongitudeDegrees>{}</LongitudeDegrees>",
            point.position.lon
        )?;
        writeln!(writer, "            </Position>")?;
    }
    if point.position.alt != 0.0 {
        writeln!(
            writer,
            "            <AltitudeMeters>{}</AltitudeMeters>",
            point.position.alt
        )?;
    }
    if point.heart_rate != 0 {
        writeln!(
            writer,
            r#"            <HeartRateBpm xsi:type="HeartRateInBeatsPerMinute_t">"#
        )?;
        writeln!(writer, "              <Value>{}</Value>", point.heart_rate)?;
        writeln!(writer, "            </HeartRateBpm>")?;
    } else {
        writeln!(
            writer,
            r#"            <HeartRateBpm xsi:type="HeartRateInBeatsPerMinute_t"/>"#
        )?;
    }
    writeln!(writer, "            <Extensions>")?;
    if point.cadence != 0 {
        writeln!(
            writer,
            r#"              <TPX xmlns="http://www.garmin.com/xmlschemas/ActivityExtension/v2">"#
        )?;
        writeln!(
            writer,
            "                <RunCadence>{}</RunCadence>",
            point.cadence
        )?;
        writeln!(writer, "              </TPX>")?;
    } else {
        writeln!(
            writer,
            r#"              <TPX xmlns="http://www.garmin.com/xmlschemas/ActivityExtension/v2"/>"#
        )?;
    }
    writeln!(writer, "            </Extensions>")?;
    writeln!(writer, "          </Trackpoint>")?;
    Ok(())
}
