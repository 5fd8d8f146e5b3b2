use log::{debug, info};
use metrograph::*;
use metrograph::diagram::{DiagramConfig, Direction, TrainCount};
use metrograph::output::svg::SvgOptions;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use structopt::StructOpt;

/// Metrograph -- metro time-distance diagrams
#[derive(StructOpt, Debug)]
#[structopt(name="metrograph")]
struct Opt {
    /// Verbose mode (-v, -vv, -vvv)
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: u8,

    /// Schedule file (headway, dwell and station lines)
    #[structopt(parse(from_os_str))]
    schedule: PathBuf,

    /// Trains dispatched per direction: per-station | double | <n>
    #[structopt(long = "trains", default_value = "double")]
    trains: TrainCount,

    /// Add fill-in trains at the edges of the time window
    #[structopt(long = "fill-in")]
    fill_in: bool,

    /// Output JSON diagram file
    #[structopt(short = "j", long = "json", parse(from_os_str))]
    json: Option<PathBuf>,

    /// Output JSON diagram as JavaScript
    #[structopt(short = "J", long = "javascript", parse(from_os_str))]
    javascript: Option<PathBuf>,

    /// Output SVG chart file
    #[structopt(short = "s", long = "svg", parse(from_os_str))]
    svg: Option<PathBuf>,

    /// SVG chart width
    #[structopt(long = "width", default_value = "900")]
    width: u32,

    /// SVG chart height
    #[structopt(long = "height", default_value = "600")]
    height: u32,

    /// Output station arrival/departure times to file
    #[structopt(short = "t", long = "timetable", parse(from_os_str))]
    timetable: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(opt :&Opt) -> AppResult<()> {
    let schedule = get_schedule(&opt.schedule)?;
    info!("Schedule: headway {} min, dwell {} min, {} stations",
          schedule.headway, schedule.dwell_time, schedule.stations.len());
    for station in &schedule.stations {
        debug!("  * {} at {}", station.name, station.chainage);
    }

    let config = DiagramConfig { train_count: opt.trains, fill_in: opt.fill_in };
    let diagram = diagram::generate(&schedule, &config)?;

    println!("# Diagram:");
    println!("> {} trains per direction, {} fill-in fragments", diagram.dispatched(), diagram.fill_in.len());
    println!("> time 0..{} min, chainage 0..{}", diagram.axes.max_time, diagram.axes.max_chainage);
    if opt.verbose >= 2 {
        for dir in &[Direction::Up, Direction::Down] {
            for (id, t) in diagram.direction(*dir) {
                println!("## Train {} departs {} arrives {}", id, t.start, t.end());
            }
        }
    }

    if let Some(ref json) = opt.json {
        let file = File::create(json)?;
        let mut writer = BufWriter::new(&file);
        output::json::json_diagram(&diagram, &mut writer)?;
    }

    if let Some(ref javascript) = opt.javascript {
        let file = File::create(javascript)?;
        let mut writer = BufWriter::new(&file);
        output::json::javascript_diagram(&diagram, &mut writer)?;
    }

    if let Some(ref svg) = opt.svg {
        let file = File::create(svg)?;
        let mut writer = BufWriter::new(&file);
        let opts = SvgOptions { width: opt.width, height: opt.height };
        output::svg::svg_diagram(&diagram, &opts, &mut writer)?;
    }

    if let Some(ref timetable) = opt.timetable {
        let file = File::create(timetable)?;
        let mut writer = BufWriter::new(&file);
        let string = output::timetable::timetable(&diagram)?;
        write!(writer, "{}", string)?;
    }

    Ok(())
}

pub fn main() {
    let opt = Opt::from_args();
    init_logging(opt.verbose);
    debug!("{:?}", opt);
    match run(&opt) {
        Ok(()) => {},
        Err(e) => {
            println!("Error:\n{}", e.as_fail());
            std::process::exit(1);
        },
    }
}
