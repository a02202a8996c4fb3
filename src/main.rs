//! roomfinder - find rooms on SVG floor plans

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use roomfinder::{
    Building, BuildingId, Floor, FloorCatalog, FloorId, Manifest, NavigationView, Navigator, Room,
    Screen, VenueIndex, resolve,
};

#[derive(Parser)]
#[command(name = "roomfinder")]
#[command(version, about = "Find rooms on annotated SVG floor plans", long_about = None)]
#[command(after_help = "EXAMPLES:
    roomfinder venue.json                  Show buildings, floors and room counts
    roomfinder venue.json --rooms          List every room with its coordinates
    roomfinder venue.json -f 101 -f Aula   Look up rooms
    roomfinder venue.json -i               Browse the venue interactively")]
struct Cli {
    /// Venue manifest (JSON)
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Room to look up (can be specified multiple times)
    #[arg(short, long = "find", value_name = "QUERY")]
    find: Vec<String>,

    /// List every room
    #[arg(short, long)]
    rooms: bool,

    /// Browse buildings and floors from the terminal
    #[arg(short, long, conflicts_with_all = ["find", "rooms"])]
    interactive: bool,

    /// Annotation layer to read instead of the manifest's
    #[arg(short, long)]
    layer: Option<String>,

    /// Fail if any floor document is malformed
    #[arg(long)]
    strict: bool,

    /// Log debug diagnostics
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let index = match load(&cli) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.interactive {
        return match browse(&index) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if !cli.find.is_empty() {
        return find(&index, &cli.find);
    }

    show_summary(&index);
    if cli.rooms {
        list_rooms(&index);
    }
    ExitCode::SUCCESS
}

fn init_logging(cli: &Cli) {
    let default = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load(cli: &Cli) -> roomfinder::Result<VenueIndex> {
    let manifest = Manifest::from_path(&cli.manifest)?;
    let mut catalog = FloorCatalog::new(&manifest).strict(cli.strict);
    if let Some(ref layer) = cli.layer {
        catalog = catalog.with_layer(layer.clone());
    }
    catalog.build()
}

fn show_summary(index: &VenueIndex) {
    println!("Buildings: {}", index.buildings().len());
    println!("Floors: {}", index.floor_count());
    println!("Rooms: {}", index.room_count());

    for building in index.buildings() {
        println!();
        println!("{}", building.name);
        for (i, floor) in building.floors().iter().enumerate() {
            let marker = if i == building.default_floor { "*" } else { " " };
            print!("  {marker} {:<10} {:>4} rooms", floor.name, floor.rooms.len());
            if floor.status.is_degraded() {
                print!("  ({})", floor.status);
            }
            println!();
        }
    }
}

fn list_rooms(index: &VenueIndex) {
    println!();
    for (id, room) in index.rooms() {
        let (Some(building), Some(floor)) =
            (index.building(id.floor.building), index.floor(id.floor))
        else {
            continue;
        };
        println!(
            "{}\t{}\t{}\t{:.2}\t{:.2}",
            building.name, floor.name, room.name, room.x, room.y
        );
    }
}

fn find(index: &VenueIndex, queries: &[String]) -> ExitCode {
    let mut missing = false;
    for query in queries {
        match resolve(query, index) {
            Some(found) => println!(
                "Found {found} at ({:.2}, {:.2})",
                found.room.x, found.room.y
            ),
            None => {
                println!("room not found: {query}");
                missing = true;
            }
        }
    }
    if missing {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

// ----------------------------------------------------------------------------
// Interactive session
// ----------------------------------------------------------------------------

const HELP: &str = "commands: list | b <number|name> | f <number> | back | quit | <room>";

/// Writes navigation output as text. The view methods cannot fail, so the
/// first write error is kept and later output dropped until it is taken.
struct TextView<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TextView<W> {
    fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(args).and_then(|()| self.out.write_all(b"\n")) {
            self.error = Some(e);
        }
    }

    fn take_error(&mut self) -> io::Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<W: Write> NavigationView for TextView<W> {
    fn show_building_list(&mut self, buildings: &[Building]) {
        for (i, building) in buildings.iter().enumerate() {
            self.line(format_args!("  [{}] {}", i + 1, building.name));
        }
    }

    fn show_floor(&mut self, building: &Building, floor: &Floor, highlighted: Option<&Room>) {
        self.line(format_args!(
            "{}: {} ({})",
            building.name,
            floor.name,
            floor.image_path.display()
        ));
        if let Some(room) = highlighted {
            self.line(format_args!(
                "  -> {} at ({:.2}, {:.2})",
                room.name, room.x, room.y
            ));
        }
    }

    fn show_floor_selector(&mut self, floors: &[Floor]) {
        let names: Vec<String> = floors
            .iter()
            .enumerate()
            .map(|(i, f)| format!("[{}] {}", i + 1, f.name))
            .collect();
        self.line(format_args!("  floors: {}", names.join("  ")));
    }

    fn show_not_found(&mut self, query: &str) {
        self.line(format_args!("room not found: {query}"));
    }
}

fn browse(index: &VenueIndex) -> io::Result<()> {
    let mut nav = Navigator::new(index);
    let mut view = TextView::new(io::stdout());

    println!("{HELP}");
    view.show_building_list(index.buildings());
    view.take_error()?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();

        let (command, arg) = match line.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        let result = match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => {
                println!("{HELP}");
                continue;
            }
            "list" => {
                view.show_building_list(index.buildings());
                view.take_error()?;
                continue;
            }
            "back" => match nav.go_back() {
                Some(instruction) => Ok(instruction),
                None => {
                    println!("already at the building list");
                    continue;
                }
            },
            "b" => match pick_building(index, arg) {
                Some(id) => nav.select_building(id),
                None => {
                    println!("unknown building: {arg}");
                    continue;
                }
            },
            "f" => match pick_floor(&nav, arg) {
                Some(id) => nav.select_floor(id),
                None => {
                    println!("unknown floor: {arg}");
                    continue;
                }
            },
            _ => Ok(nav.resolve_and_go(line)),
        };

        match result {
            Ok(instruction) => instruction.render(index, &mut view),
            Err(e) => println!("{e}"),
        }
        view.take_error()?;
    }
    Ok(())
}

/// Building by 1-based position or exact name.
fn pick_building(index: &VenueIndex, arg: &str) -> Option<BuildingId> {
    if let Ok(n) = arg.parse::<usize>() {
        return n
            .checked_sub(1)
            .map(BuildingId)
            .filter(|id| index.building(*id).is_some());
    }
    index.building_by_name(arg).map(|(id, _)| id)
}

/// Floor of the open building by 1-based position or exact name.
fn pick_floor(nav: &Navigator<'_>, arg: &str) -> Option<FloorId> {
    let building = match nav.screen() {
        Screen::Floor { floor, .. } => floor.building,
        Screen::BuildingSelector => return None,
    };
    let floors = nav.index().building(building)?.floors();

    // Floor names are often numbers themselves, so names win over positions.
    let position = floors
        .iter()
        .position(|f| f.name == arg)
        .or_else(|| arg.parse::<usize>().ok()?.checked_sub(1))
        .filter(|&i| i < floors.len())?;
    Some(FloorId {
        building,
        floor: position,
    })
}
