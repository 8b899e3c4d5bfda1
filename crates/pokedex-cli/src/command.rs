use pokedex_core::entity::EntityId;
use pokedex_core::filter::TypeFilter;

pub const USAGE: &str = "\
commands:
  search <left|right|game> <text>   type into a search box
  pick <left|right|game> <id>       choose a shown suggestion
  enter <left|right|game> <id>      same as pick, via the keyboard
  blur <left|right|game>            leave a search box
  filter [text]                     name filter for the list
  type <label|All>                  type filter for the list
  types                             list type labels
  list | next | prev | page <n>     browse the list
  fav <id> | unfav <id> | toggle <id>
  favs | favnext | favprev          browse favourites
  submit                            submit the game guess
  status | help | quit";

/// A search box the user can type into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Left,
    Right,
    Game,
}

impl Slot {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "game" => Some(Self::Game),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Game => "game",
        }
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(Slot, String),
    Pick(Slot, EntityId),
    Enter(Slot, EntityId),
    Blur(Slot),
    Filter(String),
    Type(TypeFilter),
    Types,
    List,
    Next,
    Prev,
    Page(usize),
    Fav(EntityId),
    Unfav(EntityId),
    Toggle(EntityId),
    Favs,
    FavNext,
    FavPrev,
    Submit,
    Status,
    Help,
    Quit,
}

/// Parse a line. The error is a short hint to show the user.
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let cmd = match word {
        "search" => {
            let (slot, text) = rest.split_once(' ').unwrap_or((rest, ""));
            Command::Search(slot_arg(slot)?, text.trim().to_string())
        },
        "pick" | "enter" => {
            let (slot, id) = rest.split_once(' ').unwrap_or((rest, ""));
            let slot = slot_arg(slot)?;
            let id = id_arg(id)?;
            if word == "pick" {
                Command::Pick(slot, id)
            } else {
                Command::Enter(slot, id)
            }
        },
        "blur" => Command::Blur(slot_arg(rest)?),
        "filter" => Command::Filter(rest.to_string()),
        "type" if !rest.is_empty() => Command::Type(TypeFilter::from_label(rest)),
        "types" => Command::Types,
        "list" => Command::List,
        "next" => Command::Next,
        "prev" => Command::Prev,
        "page" => Command::Page(
            rest.parse()
                .map_err(|_| format!("not a page number: {rest:?}"))?,
        ),
        "fav" => Command::Fav(id_arg(rest)?),
        "unfav" => Command::Unfav(id_arg(rest)?),
        "toggle" => Command::Toggle(id_arg(rest)?),
        "favs" => Command::Favs,
        "favnext" => Command::FavNext,
        "favprev" => Command::FavPrev,
        "submit" => Command::Submit,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(USAGE.to_string()),
    };
    Ok(cmd)
}

fn slot_arg(word: &str) -> Result<Slot, String> {
    Slot::parse(word).ok_or_else(|| format!("expected left, right or game, got {word:?}"))
}

fn id_arg(word: &str) -> Result<EntityId, String> {
    word.trim()
        .parse()
        .map_err(|_| format!("not a Pokédex number: {word:?}"))
}
