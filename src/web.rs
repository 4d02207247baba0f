//! Status page renderer.
//!
//! A pure function from [`StatusReport`] to an HTML document.  The page
//! refreshes itself every cycle and links every control to the query
//! strings understood by [`parse_query`](crate::app::commands::parse_query).
//! Serving the page is left to whatever HTTP stack hosts it.

use core::fmt::{self, Write};

use crate::app::report::{SENSOR_UNAVAILABLE, SoundLevel, StatusReport};
use crate::control::hold_off::Actuator;

const STYLE: &str = "\
body{font-family:'Segoe UI',Tahoma,Verdana,sans-serif;background:#eef2f3;margin:0;text-align:center}\
.box{background:#fff;margin:50px auto;padding:30px 25px;max-width:400px;border-radius:12px;box-shadow:0 4px 20px rgba(0,0,0,.1)}\
.line{font-size:16px;margin:10px 0}\
.on{color:green;background:#d4edda;padding:5px 10px;border-radius:5px;font-weight:600}\
.off{color:red;background:#f8d7da;padding:5px 10px;border-radius:5px;font-weight:600}\
.na{color:#6c757d;font-style:italic}\
.btn{margin:6px 3px;padding:10px 18px;background:#007bff;color:#fff;border:none;border-radius:6px;cursor:pointer}";

/// Render the full status page.  `refresh_secs` sets the meta refresh.
pub fn render_status_page(report: &StatusReport, refresh_secs: u32) -> String {
    let mut html = String::with_capacity(4096);
    // Writing into a String cannot fail.
    let _ = write_page(&mut html, report, refresh_secs);
    html
}

fn write_page(out: &mut String, r: &StatusReport, refresh_secs: u32) -> fmt::Result {
    write!(
        out,
        "<!DOCTYPE html><html><head><title>Room Automation</title>\
         <meta http-equiv='refresh' content='{refresh_secs}'><style>{STYLE}</style></head>\
         <body><div class='box'><h2>Room Automation</h2>"
    )?;

    line_badge(out, "Auto Mode", r.auto_mode, "ON", "OFF")?;
    buttons(out, "auto", "Enable Auto", "Disable Auto")?;

    line_text(out, "Temperature", &r.temperature_text())?;
    line_text(out, "Humidity", &r.humidity_text())?;
    line_text(out, "Lux", &r.lux_text())?;
    match r.brightness {
        Some(b) => line_text(out, "Brightness", &b.label())?,
        None => line_text(out, "Brightness", &r.lux_text())?,
    }
    line_text(out, "Mic Value", &r.mic_text())?;
    match r.sound {
        Some(level) => line_badge(out, "Sound Level", level == SoundLevel::Loud, "Loud", "Normal")?,
        None => line_text(out, "Sound Level", &r.mic_text())?,
    }
    line_text(out, "Proximity Level", &r.proximity_text())?;
    line_badge(out, "Presence", r.present, "YES", "NO")?;
    match r.motion {
        Some(moving) => line_badge(out, "Motion Detection", moving, "YES", "NO")?,
        None => line_text(out, "Motion Detection", &SENSOR_UNAVAILABLE)?,
    }

    for actuator in [Actuator::Fan, Actuator::Light, Actuator::Presence] {
        let status = r.actuator(actuator);
        let label = match actuator {
            Actuator::Fan => "Fan",
            Actuator::Light => "Light",
            Actuator::Presence => "Presence LED",
        };
        write!(
            out,
            "<div class='line'>{label}: <span class='{}'>{}</span></div>",
            if status.on { "on" } else { "off" },
            status.phase.label().to_ascii_uppercase(),
        )?;
        let name = actuator.name();
        write!(
            out,
            "<a href='/?{name}=on'><button class='btn'>Turn {label} ON</button></a>\
             <a href='/?{name}=off'><button class='btn'>Turn {label} OFF</button></a>"
        )?;
    }

    out.write_str("</div></body></html>")
}

fn line_text(out: &mut String, label: &str, value: &dyn fmt::Display) -> fmt::Result {
    let text = value.to_string();
    let class = if text == SENSOR_UNAVAILABLE { " class='na'" } else { "" };
    write!(out, "<div class='line'>{label}: <span{class}>{text}</span></div>")
}

fn line_badge(out: &mut String, label: &str, on: bool, yes: &str, no: &str) -> fmt::Result {
    write!(
        out,
        "<div class='line'>{label}: <span class='{}'>{}</span></div>",
        if on { "on" } else { "off" },
        if on { yes } else { no },
    )
}

fn buttons(out: &mut String, key: &str, on_text: &str, off_text: &str) -> fmt::Result {
    write!(
        out,
        "<a href='/?{key}=on'><button class='btn'>{on_text}</button></a>\
         <a href='/?{key}=off'><button class='btn'>{off_text}</button></a>"
    )
}
