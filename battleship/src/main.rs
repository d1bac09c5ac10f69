use std::{
    fmt,
    io::{self, BufRead, Write},
};

use anyhow::Context;
use clap::{App, Arg, ArgMatches};
use glam::IVec2;
use log::warn;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use battleship_placement::{
    board::{Region, SessionError},
    config::BoardConfig,
    Highlight, PlacedShip, PlacementSession, ShipClass,
};

/// Number of random pointer positions to try per ship before giving up.
const RANDOM_ATTEMPTS: usize = 1000;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Place a fleet on the battleship grid by pointing at pixels.")
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("board layout and fleet, as TOML")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("grid_size")
                .short("g")
                .long("grid-size")
                .value_name("CELLS")
                .help("override the number of cells per side")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("board_width")
                .short("w")
                .long("board-width")
                .value_name("PIXELS")
                .help("override the board width in pixels")
                .takes_value(true),
        )
        .get_matches();

    let config = load_config(&matches)?;
    let rotate_button = config.rotate_button();
    let mut session = PlacementSession::new(config.board()?);
    for &class in &config.fleet {
        if let Err(err) = session.add_ship(class, class) {
            warn!("skipping fleet entry: {}", err);
        }
    }

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut rng = rand::thread_rng();

    choose_placements(&mut rng, &mut session, rotate_button, &mut input)?;

    match session.finish() {
        Ok(fleet) => {
            println!("Fleet placed:");
            for (class, ship) in fleet {
                show_placed(class, &ship);
            }
        }
        Err(_) => println!("Not every ship was placed."),
    }
    Ok(())
}

/// Load the config file if one was given, then apply command line overrides.
fn load_config(matches: &ArgMatches) -> anyhow::Result<BoardConfig> {
    let mut config = match matches.value_of("config") {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };
    if let Some(grid_size) = matches.value_of("grid_size") {
        config.grid_size = grid_size
            .parse()
            .with_context(|| format!("invalid grid size: {}", grid_size))?;
    }
    if let Some(board_width) = matches.value_of("board_width") {
        config.board_width = board_width
            .parse()
            .with_context(|| format!("invalid board width: {}", board_width))?;
    }
    Ok(config)
}

/// Run the placement loop until every ship is placed and the player is done.
fn choose_placements(
    rng: &mut impl Rng,
    session: &mut PlacementSession<ShipClass>,
    rotate_button: Region,
    input: &mut InputReader<impl BufRead>,
) -> io::Result<()> {
    enum Command {
        Done,
        Move(IVec2),
        Click(IVec2),
        Rotate,
        Confirm,
        Select(ShipClass),
        Unplace(ShipClass),
        Clear,
        RandomizeRest,
        Help,
    }
    println!();
    println!("Place ships. Type help or ? for commands.");
    loop {
        println!();
        /// Matcher for commands with a pixel position.
        static POINT: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?x)(?P<cmd>move|m|click|k)\s+
        (?P<x>-?[0-9]+)(?:\s*,\s*|\s+)(?P<y>-?[0-9]+)$",
            )
            .unwrap()
        });
        static SHIP: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"^(?x)(?P<cmd>select|s|un-?place|remove)\s+
        (?P<ship>\w+)$",
            )
            .unwrap()
        });

        match session.active() {
            Some((ship, placement)) => println!(
                "Placing the {} ({:?}). Board is at {:?}, {}px per cell.",
                ShipFullName(*ship),
                placement.orientation(),
                session.board().origin(),
                session.board().tile_size(),
            ),
            None if session.ready() => println!("All ships placed, type done to finish"),
            None => println!("Select a ship to place."),
        }
        show_board(session);
        println!();

        let cmd = input.read_input_lower("> ", |input| match input {
            "?" | "help" | "h" => Some(Command::Help),
            "randomize" | "rand" | "random" => Some(Command::RandomizeRest),
            "done" | "finish" => Some(Command::Done),
            "clear" => Some(Command::Clear),
            "rotate" | "r" => Some(Command::Rotate),
            "confirm" | "c" => Some(Command::Confirm),
            other => {
                if let Some(captures) = POINT.captures(other) {
                    let coord = |name| captures.name(name).unwrap().as_str().parse::<i32>();
                    let point = match (coord("x"), coord("y")) {
                        (Ok(x), Ok(y)) => IVec2::new(x, y),
                        _ => {
                            println!("pixel coordinates are out of range");
                            return None;
                        }
                    };
                    match captures.name("cmd").unwrap().as_str() {
                        "move" | "m" => Some(Command::Move(point)),
                        _ => Some(Command::Click(point)),
                    }
                } else if let Some(captures) = SHIP.captures(other) {
                    let name = captures.name("ship").unwrap().as_str();
                    let unplace = !matches!(captures.name("cmd").unwrap().as_str(), "select" | "s");
                    if unplace && name == "all" {
                        return Some(Command::Clear);
                    }
                    match parse_ship(name) {
                        Some(ship) if unplace => Some(Command::Unplace(ship)),
                        Some(ship) => Some(Command::Select(ship)),
                        None => {
                            println!("invalid ship: {}, choose \"carrier\", \"battleship\", \"destroyer\", \"frigate\", or \"patrol\"", name);
                            None
                        }
                    }
                } else {
                    println!("Invalid ship-placement command \"{}\". Use '?' for help", other);
                    None
                }
            }
        })?;

        match cmd {
            Command::Done if session.ready() => break,
            Command::Done => println!("You must place all your ships first!"),
            Command::Move(point) => {
                if let Some(Highlight::Deselected) = session.pointer_moved(point) {
                    println!("That position is off the board.");
                }
            }
            Command::Click(point) if rotate_button.contains(point) => report(session.rotate()),
            Command::Click(point) => {
                session.pointer_moved(point);
                report(session.confirm().map(|_| ()));
            }
            Command::Rotate => report(session.rotate()),
            Command::Confirm => report(session.confirm().map(|_| ())),
            Command::Select(ship) => report(session.select(&ship)),
            Command::Unplace(ship) => {
                if !session.unplace(&ship) {
                    println!("The {} has not been placed.", ShipFullName(ship));
                }
            }
            Command::Clear => {
                for ship in ShipClass::ALL {
                    session.unplace(ship);
                }
            }
            Command::RandomizeRest => choose_random_placements(rng, session),
            Command::Help => {
                println!(
                    "Available Commands:
    done                    if all ships are placed, finish placement.
    move <x>,<y>            move the pointer to the given pixel.
    click <x>,<y>           press at the given pixel: rotates if on the rotate button,
        otherwise moves the pointer there and confirms.
    rotate                  rotate the ship being placed.
    confirm                 place the ship at the highlighted cells.
    select <ship>           switch to placing the specified ship.
    unplace <ship>          pick the specified ship back up.
        Additionally \"all\" may be specified to pick up every ship.
    clear                   picks up all ships.
    randomize               randomly place the remaining ships.

Rotate button: {:?} to {:?}

Available Ships:
    \"carrier\" (\"cv\")
    \"battleship\" (\"bb\")
    \"destroyer\" (\"dd\")
    \"frigate\" (\"ff\")
    \"patrol\" (\"pb\")",
                    rotate_button.top_left,
                    rotate_button.top_left + rotate_button.size,
                );
            }
        }
    }
    Ok(())
}

/// Parse a ship class from its name or abbreviation.
fn parse_ship(name: &str) -> Option<ShipClass> {
    match name {
        "cv" | "carrier" => Some(ShipClass::Carrier),
        "bb" | "battleship" => Some(ShipClass::Battleship),
        "dd" | "destroyer" => Some(ShipClass::Destroyer),
        "ff" | "frigate" => Some(ShipClass::Frigate),
        "pb" | "patrol" => Some(ShipClass::Patrol),
        _ => None,
    }
}

/// Print why a session command failed, if it did.
fn report<T>(result: Result<T, SessionError>) {
    if let Err(err) = result {
        println!("{}", err);
    }
}

/// Place every remaining ship by pointing at random pixels on the board with a random
/// orientation until a position fits.
fn choose_random_placements(rng: &mut impl Rng, session: &mut PlacementSession<ShipClass>) {
    let region = session.board().region();
    let pending: Vec<ShipClass> = session.pending_ships().copied().collect();
    for ship in pending {
        if session.select(&ship).is_err() {
            continue;
        }
        let placed = (0..RANDOM_ATTEMPTS).any(|_| {
            let point = IVec2::new(
                rng.gen_range(region.top_left.x, region.top_left.x + region.size.x),
                rng.gen_range(region.top_left.y, region.top_left.y + region.size.y),
            );
            session.orient(rng.gen()).is_ok()
                && session.pointer_moved(point) == Some(Highlight::Valid)
                && session.confirm().is_ok()
        });
        if !placed {
            warn!("could not find a random position for the {}", ShipFullName(ship));
        }
    }
}

/// Print out the board, with committed ships by abbreviation and the active ship's
/// highlighted cells.
fn show_board(session: &PlacementSession<ShipClass>) {
    enum SetupCell {
        Empty,
        Selected,
        Ship(ShipAbbreviation),
    }
    impl fmt::Display for SetupCell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                SetupCell::Empty => f.pad("~~"),
                SetupCell::Selected => f.pad("##"),
                SetupCell::Ship(abbrev) => fmt::Display::fmt(abbrev, f),
            }
        }
    }
    let size = session.board().grid_size();
    let mut marks: Vec<Option<ShipClass>> = vec![None; size * size];
    for (&ship, placed) in session.placed_ships() {
        for cell in placed.cells() {
            marks[cell.row * size + cell.col] = Some(ship);
        }
    }
    let selected: Vec<_> = session
        .active()
        .map(|(_, placement)| placement.selected_cells().collect())
        .unwrap_or_default();

    print!("   ");
    for i in 0..size {
        print!("{:^4}", i);
    }
    println!();
    for (i, row) in session.board().rows().enumerate() {
        print!("{:>2} ", i);
        for cell in row {
            let mark = if selected.contains(&cell) {
                SetupCell::Selected
            } else {
                match marks[cell.row * size + cell.col] {
                    Some(ship) => SetupCell::Ship(ShipAbbreviation(ship)),
                    None => SetupCell::Empty,
                }
            };
            print!("{:^4}", mark);
        }
        println!();
    }
}

/// Print where a committed ship ended up and where its sprite is drawn.
fn show_placed(ship: ShipClass, placed: &PlacedShip) {
    let sprite = placed.sprite_region();
    println!(
        "  {:<10} {:?} from {:?} to {:?}, centered at ({}, {}), sprite {}x{} at ({}, {})",
        ShipFullName(ship),
        placed.orientation(),
        placed.cells()[0],
        placed.cells()[placed.cells().len() - 1],
        placed.anchor().x,
        placed.anchor().y,
        sprite.size.x,
        sprite.size.y,
        sprite.top_left.x,
        sprite.top_left.y,
    );
}

/// Display helper that prints the ship's full name.
struct ShipFullName(ShipClass);

impl ShipFullName {
    fn name(&self) -> &'static str {
        match self.0 {
            ShipClass::Carrier => "carrier",
            ShipClass::Battleship => "battleship",
            ShipClass::Destroyer => "destroyer",
            ShipClass::Frigate => "frigate",
            ShipClass::Patrol => "patrol boat",
        }
    }
}

impl fmt::Display for ShipFullName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Display helper that prints the ship's class abbreviation
struct ShipAbbreviation(ShipClass);

impl ShipAbbreviation {
    fn abbrev(&self) -> &'static str {
        match self.0 {
            ShipClass::Carrier => "cv",
            ShipClass::Battleship => "bb",
            ShipClass::Destroyer => "dd",
            ShipClass::Frigate => "ff",
            ShipClass::Patrol => "pb",
        }
    }
}

impl fmt::Display for ShipAbbreviation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.abbrev())
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Converts
    /// to ascii lower before running the checker.
    fn read_input_lower<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            print!("{} ", prompt);
            io::stdout().flush()?;
            self.buf.clear();
            if self.read.read_line(&mut self.buf)? == 0 {
                println!();
                std::process::exit(0);
            }
            self.buf.make_ascii_lowercase();
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }
}
