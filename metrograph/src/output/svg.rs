use failure::Error;
use std::io;

use crate::diagram::{Diagram, Direction, Trajectory};
use crate::input::schedule::{Chainage, Minutes};

const UP_COLOR: &str = "#1f77b4";
const DOWN_COLOR: &str = "#ff7f0e";
const STATION_COLOR: &str = "#a2a2a1";

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 90.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;

#[derive(Copy, Clone, Debug)]
pub struct SvgOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for SvgOptions {
    fn default() -> SvgOptions {
        SvgOptions { width: 900, height: 600 }
    }
}

struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    max_time: f64,
    max_chainage: f64,
}

impl Frame {
    fn new(opts: &SvgOptions, max_time: Minutes, max_chainage: Chainage) -> Frame {
        Frame {
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: (opts.width as f64 - MARGIN_LEFT - MARGIN_RIGHT).max(1.0),
            height: (opts.height as f64 - MARGIN_TOP - MARGIN_BOTTOM).max(1.0),
            max_time: max_time.max(1) as f64,
            max_chainage: max_chainage.max(1) as f64,
        }
    }

    fn x(&self, t: Minutes) -> f64 {
        self.left + t as f64 / self.max_time * self.width
    }

    fn y(&self, c: Chainage) -> f64 {
        self.top + self.height - c as f64 / self.max_chainage * self.height
    }

    fn right(&self) -> f64 {
        self.left + self.width
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn color(d: Direction) -> &'static str {
    match d {
        Direction::Up => UP_COLOR,
        Direction::Down => DOWN_COLOR,
    }
}

fn polyline<W: io::Write>(f: &mut W, frame: &Frame, t: &Trajectory, color: &str) -> Result<(), Error> {
    let points = t.points()
        .map(|(time, c)| format!("{:.1},{:.1}", frame.x(time), frame.y(c)))
        .collect::<Vec<_>>();
    writeln!(f, "<polyline fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\" points=\"{}\"/>",
             color, points.join(" "))?;
    Ok(())
}

/// Write the diagram as an SVG time-distance chart.
pub fn svg_diagram<W: io::Write>(diagram: &Diagram, opts: &SvgOptions, f: &mut W) -> Result<(), Error> {
    let axes = &diagram.axes;
    let frame = Frame::new(opts, axes.max_time, axes.max_chainage);

    writeln!(f, "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" \
                 viewBox=\"0 0 {} {}\" font-family=\"sans-serif\" font-size=\"11\">",
             opts.width, opts.height, opts.width, opts.height)?;
    writeln!(f, "<rect width=\"100%\" height=\"100%\" fill=\"white\"/>")?;
    writeln!(f, "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"16\">Train Schedule</text>",
             frame.left + frame.width / 2.0, frame.top / 2.0 + 5.0)?;

    // Station bands
    for station in &axes.station_ticks {
        writeln!(f, "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" \
                     stroke-width=\"7.5\" stroke-opacity=\"0.1\"/>",
                 frame.x(0), frame.y(station.chainage),
                 frame.x(axes.max_time), frame.y(station.chainage), STATION_COLOR)?;
    }

    // Time grid
    for &t in &axes.time_ticks {
        writeln!(f, "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"black\" \
                     stroke-width=\"1.5\" stroke-opacity=\"0.25\" stroke-dasharray=\"6,4\"/>",
                 frame.x(t), frame.top, frame.x(t), frame.bottom())?;
        writeln!(f, "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>",
                 frame.x(t), frame.bottom() + 16.0, t)?;
    }

    for frag in &diagram.fill_in {
        polyline(f, &frame, &frag.trajectory, color(frag.direction))?;
    }
    for (id, t) in &diagram.trains {
        polyline(f, &frame, t, color(id.direction))?;
    }

    // Frame and axes
    writeln!(f, "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"none\" stroke=\"black\"/>",
             frame.left, frame.top, frame.width, frame.height)?;

    let label_step = (axes.chainage_ticks.len() / 20).max(1);
    for &c in axes.chainage_ticks.iter().step_by(label_step) {
        writeln!(f, "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{}</text>",
                 frame.left - 6.0, frame.y(c) + 4.0, c)?;
    }
    for station in &axes.station_ticks {
        writeln!(f, "<text x=\"{:.1}\" y=\"{:.1}\">{}</text>",
                 frame.right() + 6.0, frame.y(station.chainage) + 4.0, escape(&station.name))?;
    }

    writeln!(f, "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">Time (minutes)</text>",
             frame.left + frame.width / 2.0, frame.bottom() + 40.0)?;
    writeln!(f, "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" transform=\"rotate(-90 {:.1} {:.1})\">Chainage (km)</text>",
             frame.left - 45.0, frame.top + frame.height / 2.0,
             frame.left - 45.0, frame.top + frame.height / 2.0)?;
    writeln!(f, "</svg>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{generate, DiagramConfig, TrainCount};
    use crate::input::schedule::Schedule;

    fn render(config: DiagramConfig) -> String {
        let s = Schedule::from_parts(3, 2, &["A&B", "C"], &[0, 6]).unwrap();
        let d = generate(&s, &config).unwrap();
        let mut buf = Vec::new();
        svg_diagram(&d, &SvgOptions::default(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn one_polyline_per_train() {
        let svg = render(DiagramConfig { train_count: TrainCount::Fixed(2), fill_in: false });
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 4);
        assert_eq!(svg.matches(UP_COLOR).count(), 2);
        assert_eq!(svg.matches(DOWN_COLOR).count(), 2);
        assert!(svg.contains("A&amp;B"));
    }

    #[test]
    fn fill_in_adds_polylines() {
        // 7 samples, headway 3: shifts 3 and 6 on each edge and direction.
        let svg = render(DiagramConfig { train_count: TrainCount::Fixed(2), fill_in: true });
        assert_eq!(svg.matches("<polyline").count(), 4 + 8);
    }

    #[test]
    fn frame_maps_corners() {
        let frame = Frame::new(&SvgOptions { width: 260, height: 210 }, 10, 5);
        assert_eq!(frame.x(0), MARGIN_LEFT);
        assert_eq!(frame.x(10), 260.0 - MARGIN_RIGHT);
        assert_eq!(frame.y(0), 210.0 - MARGIN_BOTTOM);
        assert_eq!(frame.y(5), MARGIN_TOP);
    }
}
