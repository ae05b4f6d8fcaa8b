//! GPX 1.1 serialization.

use std::io::Write;

use crate::activity::Activity;
use crate::error::Result;
use crate::trackpoint::TrackPoint;

use super::iso_timestamp;

/// Write an activity's trackpoints as a GPX 1.1 document.
pub fn write_gpx<W: Write>(
    writer: &mut W,
    activity: &Activity,
    points: &[TrackPoint],
) -> Result<()> {
    let start = iso_timestamp(activity.start_time)?;

    writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        writer,
        r#"<gpx version="1.1" creator="trackalign" xmlns="http://www.topografix.com/GPX/1/1" xmlns:gpxdata="http://www.cluetrust.com/XML/GPXDATA/1/0" xmlns:gpxtpx="http://www.garmin.com/xmlschemas/TrackPointExtension/v1">"#
    )?;
    writeln!(writer, "  <metadata>")?;
    writeln!(writer, "    <time>{start}</time>")?;
    writeln!(writer, "  </metadata>")?;
    writeln!(writer, "  <trk>")?;
    writeln!(writer, "    <name>{start}</name>")?;
    writeln!(writer, "    <trkseg>")?;

    for point in points {
        writeln!(
            writer,
            r#"      <trkpt lat="{}" lon="{}">"#,
            point.position.lat, point.position.lon
        )?;
        writeln!(writer, "        <ele>{}</ele>", point.position.alt)?;
        writeln!(writer, "        <time>{}</time>", iso_timestamp(point.time)?)?;
        writeln!(writer, "        <extensions>")?;
        if point.heart_rate != 0 {
            writeln!(writer, "          <gpxtpx:TrackPointExtension>")?;
            writeln!(
                writer,
                "            <gpxtpx:hr>{}</gpxtpx:hr>",
                point.heart_rate
            )?;
            writeln!(writer, "          </gpxtpx:TrackPointExtension>")?;
        } else {
            writeln!(writer, "          <gpxtpx:TrackPointExtension/>")?;
        }
        if point.cadence != 0 {
            writeln!(
                writer,
                "          <gpxdata:cadence>{}</gpxdata:cadence>",
                point.cadence
            )?;
        }
        writeln!(writer, "        </extensions>")?;
        writeln!(writer, "      </trkpt>")?;
    }

    writeln!(writer, "    </trkseg>")?;
    writeln!(writer, "  </trk>")?;
    writeln!(writer, "</gpx>")?;
    Ok(())
}
