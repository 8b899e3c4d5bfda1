use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use pokedex_core::catalog::{Catalog, LoadState};
use pokedex_core::compare::{CompareSelector, Side};
use pokedex_core::entity::{Entity, EntityId};
use pokedex_core::error::LoadError;
use pokedex_core::favourites::{EMPTY_FAVOURITES_LABEL, FavouritesRepository, FavouritesStore};
use pokedex_core::filter::FilterController;
use pokedex_core::pagination::PageView;
use pokedex_core::search::{NO_MATCHES_LABEL, SearchEngine, SuggestionKey, Suggestions};
use pokedex_guess::{GuessPhase, GuessingGame};

use crate::command::{Command, Slot, USAGE};
use crate::config::CliConfig;

/// Views that only exist once the catalog is ready.
struct Views {
    browse: FilterController,
    compare: CompareSelector,
}

/// Everything the terminal front end shows, driven one command at a time.
pub struct App {
    config: CliConfig,
    load: LoadState,
    views: Option<Views>,
    favourites: FavouritesStore,
    repo: Box<dyn FavouritesRepository>,
    game: GuessingGame,
}

impl App {
    pub fn new(config: CliConfig, repo: Box<dyn FavouritesRepository>) -> Self {
        let favourites = FavouritesStore::load_from(repo.as_ref(), config.browse.page_size);
        let game = GuessingGame::with_config(config.guess.clone());
        Self {
            config,
            load: LoadState::Loading,
            views: None,
            favourites,
            repo,
            game,
        }
    }

    /// Deliver the data source's result. Later deliveries are ignored.
    pub fn catalog_ready<R: Rng>(
        &mut self,
        result: Result<Catalog, LoadError>,
        rng: &mut R,
    ) -> Vec<String> {
        if !self.load.complete(result) {
            return Vec::new();
        }
        let Some(catalog) = self.load.catalog().map(Arc::clone) else {
            return self.load.banner().into_iter().collect();
        };

        self.views = Some(Views {
            browse: FilterController::new(Arc::clone(&catalog), &self.config.browse),
            compare: CompareSelector::new(Arc::clone(&catalog), &self.config.browse),
        });
        let count = catalog.len();
        self.game.catalog_loaded(catalog, rng);

        let mut out = vec![format!("Loaded {count} Pokémon")];
        out.extend(self.list_lines());
        out
    }

    /// Advance every timer by `dt`, returning lines for whatever changed.
    pub fn advance(&mut self, dt: Duration) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(views) = &mut self.views {
            for (side, slot) in [(Side::Left, Slot::Left), (Side::Right, Slot::Right)] {
                let engine = views.compare.slot_mut(side);
                if engine.advance(dt) {
                    out.extend(suggestion_lines(slot, engine));
                }
            }
        }

        let tick = self.game.advance(dt);
        if tick.search
            && let Some(engine) = self.game.search()
        {
            out.extend(suggestion_lines(Slot::Game, engine));
        }
        if tick.reverted {
            out.push(format!("[game] {}", self.game.feedback().label()));
        }
        out
    }

    pub fn handle(&mut self, cmd: Command) -> Vec<String> {
        match cmd {
            Command::Search(slot, text) => self.with_engine(slot, |engine| {
                engine.focus();
                engine.input(text);
                Vec::new()
            }),
            Command::Blur(slot) => self.with_engine(slot, |engine| {
                engine.blur();
                Vec::new()
            }),
            Command::Pick(slot, id) => self.pick(slot, id, false),
            Command::Enter(slot, id) => self.pick(slot, id, true),
            Command::Filter(text) => self.with_browse(|b| b.set_text(text)),
            Command::Type(filter) => self.with_browse(|b| b.set_type(filter)),
            Command::Types => match &self.views {
                Some(views) => vec![views.browse.type_options().join(", ")],
                None => self.banner(),
            },
            Command::List => self.with_browse(|_| ()),
            Command::Next => self.with_browse(|b| {
                b.next_page();
            }),
            Command::Prev => self.with_browse(|b| {
                b.prev_page();
            }),
            Command::Page(n) => self.with_browse(|b| b.go_to_page(n)),
            Command::Fav(id) => {
                let changed = self.favourites.add(id);
                self.favourites_changed(changed, id)
            },
            Command::Unfav(id) => {
                let changed = self.favourites.remove(id);
                self.favourites_changed(changed, id)
            },
            Command::Toggle(id) => {
                self.favourites.toggle(id);
                self.favourites_changed(true, id)
            },
            Command::Favs => self.favourite_lines(),
            Command::FavNext => {
                self.favourites.next_page();
                self.favourite_lines()
            },
            Command::FavPrev => {
                self.favourites.prev_page();
                self.favourite_lines()
            },
            Command::Submit => self.submit(),
            Command::Status => self.status_lines(),
            Command::Help => vec![USAGE.to_string()],
            Command::Quit => Vec::new(),
        }
    }

    fn banner(&self) -> Vec<String> {
        self.load.banner().into_iter().collect()
    }

    fn with_engine(
        &mut self,
        slot: Slot,
        f: impl FnOnce(&mut SearchEngine) -> Vec<String>,
    ) -> Vec<String> {
        let engine = match slot {
            Slot::Left => self.views.as_mut().map(|v| v.compare.slot_mut(Side::Left)),
            Slot::Right => self.views.as_mut().map(|v| v.compare.slot_mut(Side::Right)),
            Slot::Game => self.game.search_mut(),
        };
        match engine {
            Some(engine) => f(engine),
            None => self.load.banner().into_iter().collect(),
        }
    }

    fn pick(&mut self, slot: Slot, id: EntityId, keyboard: bool) -> Vec<String> {
        let picked = match slot {
            Slot::Game => {
                if self.game.search().is_none() {
                    return self.banner();
                }
                if self.game.phase() == GuessPhase::Solved {
                    return vec![format!("[game] {}", self.game_status())];
                }
                self.game.select_suggestion(id)
            },
            Slot::Left | Slot::Right => {
                let side = if slot == Slot::Left {
                    Side::Left
                } else {
                    Side::Right
                };
                let Some(views) = &mut self.views else {
                    return self.banner();
                };
                let engine = views.compare.slot_mut(side);
                if keyboard {
                    engine.key_down(id, SuggestionKey::Enter)
                } else {
                    engine.select(id)
                }
            },
        };
        match picked {
            Some(entity) => vec![format!(
                "[{}] Selected: {}",
                slot.name(),
                entity_line(&entity, self.favourites.is_favourite(entity.id))
            )],
            None => vec![format!("[{}] #{id} is not among the suggestions", slot.name())],
        }
    }

    fn with_browse(&mut self, f: impl FnOnce(&mut FilterController)) -> Vec<String> {
        match &mut self.views {
            Some(views) => {
                f(&mut views.browse);
                self.list_lines()
            },
            None => self.banner(),
        }
    }

    fn list_lines(&self) -> Vec<String> {
        match &self.views {
            Some(views) => page_lines(&views.browse.page(), &self.favourites),
            None => self.banner(),
        }
    }

    fn favourites_changed(&mut self, changed: bool, id: EntityId) -> Vec<String> {
        let mut out = Vec::new();
        if changed && let Err(e) = self.favourites.save_to(self.repo.as_ref()) {
            tracing::warn!(error = %e, "Could not save favourites");
            out.push(e.to_string());
        }
        let state = if self.favourites.is_favourite(id) {
            "added to"
        } else {
            "not in"
        };
        out.push(format!("#{id} {state} favourites ({})", self.favourites.len()));
        out
    }

    fn favourite_lines(&self) -> Vec<String> {
        let Some(catalog) = self.load.catalog() else {
            return self.banner();
        };
        if self.favourites.is_empty() {
            return vec![EMPTY_FAVOURITES_LABEL.to_string()];
        }
        page_lines(&self.favourites.page(catalog), &self.favourites)
    }

    fn submit(&mut self) -> Vec<String> {
        if self.game.search().is_none() {
            return self.banner();
        }
        match self.game.submit() {
            Some(feedback) => vec![format!(
                "[game] {} [{}] (guesses: {})",
                feedback.label(),
                feedback.tone().name(),
                self.game.guess_count()
            )],
            None => vec![format!("[game] {}", self.game_status())],
        }
    }

    fn game_status(&self) -> String {
        let guess = self
            .game
            .current_guess()
            .map_or("none".to_string(), |e| e.name.clone());
        let button = if self.game.can_submit() {
            "ready"
        } else {
            "disabled"
        };
        format!(
            "{:?}: {} [{button}], guess {guess}, guesses {}",
            self.game.phase(),
            self.game.feedback().label(),
            self.game.guess_count()
        )
    }

    fn status_lines(&self) -> Vec<String> {
        let mut out = self.banner();
        if let Some(views) = &self.views {
            for side in [Side::Left, Side::Right] {
                let caption = views
                    .compare
                    .caption(side)
                    .unwrap_or_else(|| views.compare.slot(side).selection_label().to_string());
                out.push(format!("[{side:?}] {caption}"));
            }
        }
        out.push(format!("[game] {}", self.game_status()));
        out.push(format!("favourites: {}", self.favourites.len()));
        out
    }
}

fn entity_line(entity: &Entity, favourite: bool) -> String {
    let star = if favourite { " *" } else { "" };
    format!(
        "#{:03} {}{star} [{}]",
        entity.id,
        entity.name,
        entity.types.join("/")
    )
}

fn suggestion_lines(slot: Slot, engine: &SearchEngine) -> Vec<String> {
    let prefix = format!("[{}]", slot.name());
    match engine.suggestions() {
        Suggestions::Hidden => vec![format!("{prefix} (no suggestions)")],
        Suggestions::NoMatches => vec![format!("{prefix} {NO_MATCHES_LABEL}")],
        Suggestions::Matches(list) => list
            .iter()
            .map(|e| format!("{prefix}   #{} {}", e.id, e.name))
            .collect(),
    }
}

fn page_lines(view: &PageView<Arc<Entity>>, favourites: &FavouritesStore) -> Vec<String> {
    let mut out: Vec<String> = view
        .items
        .iter()
        .map(|e| entity_line(e, favourites.is_favourite(e.id)))
        .collect();
    let prev = if view.has_prev { "< prev" } else { "      " };
    let next = if view.has_next { "next >" } else { "" };
    out.push(format!("{prev}  {}  {next}", view.label()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_core::test_helpers::{MemoryRepository, ms, sample_entities};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn ready_app(entities: Vec<Entity>) -> App {
        seeded_app(entities, 9)
    }

    fn seeded_app(entities: Vec<Entity>, seed: u64) -> App {
        let mut app = App::new(CliConfig::default(), Box::new(MemoryRepository::default()));
        let mut rng = StdRng::seed_from_u64(seed);
        let out = app.catalog_ready(Catalog::new(entities), &mut rng);
        assert!(out[0].starts_with("Loaded"));
        app
    }

    #[test]
    fn commands_before_load_show_loading() {
        let mut app = App::new(CliConfig::default(), Box::new(MemoryRepository::default()));
        assert_eq!(app.handle(Command::List), vec!["Loading..."]);
        assert_eq!(app.handle(Command::Submit), vec!["Loading..."]);
        assert_eq!(
            app.handle(Command::Search(Slot::Left, "pika".to_string())),
            vec!["Loading..."]
        );
    }

    #[test]
    fn load_failure_is_shown_verbatim_everywhere() {
        let mut app = App::new(CliConfig::default(), Box::new(MemoryRepository::default()));
        let mut rng = StdRng::seed_from_u64(1);
        let out = app.catalog_ready(Err(LoadError::Source("offline".to_string())), &mut rng);
        assert_eq!(out, vec!["Error: offline"]);
        assert_eq!(app.handle(Command::Favs), vec!["Error: offline"]);
        assert_eq!(app.handle(Command::Types), vec!["Error: offline"]);

        // Favourites still work without a catalog.
        let out = app.handle(Command::Fav(25));
        assert_eq!(out, vec!["#25 added to favourites (1)"]);
    }

    #[test]
    fn browse_filters_and_pages() {
        let mut app = ready_app(sample_entities());
        let out = app.handle(Command::Filter("char".to_string()));
        assert_eq!(out.len(), 4);
        assert!(out[0].starts_with("#004 Charmander"));
        assert!(out[3].contains("Page 1 of 1"));
    }

    #[test]
    fn compare_slot_search_and_pick() {
        let mut app = ready_app(sample_entities());
        app.handle(Command::Search(Slot::Left, "squirt".to_string()));
        let shown = app.advance(ms(300));
        assert_eq!(shown, vec!["[left]   #7 Squirtle"]);

        let out = app.handle(Command::Pick(Slot::Left, 7));
        assert_eq!(out, vec!["[left] Selected: #007 Squirtle [water]"]);

        let status = app.handle(Command::Status);
        assert!(status.contains(&"[Left] Selected: Squirtle".to_string()));
        assert!(status.contains(&"[Right] SELECT A POKEMON".to_string()));

        app.handle(Command::Search(Slot::Right, "rai".to_string()));
        app.advance(ms(300));
        assert_eq!(
            app.handle(Command::Enter(Slot::Right, 26)),
            vec!["[right] Selected: #026 Raichu [electric]"]
        );
        assert_eq!(
            app.handle(Command::Enter(Slot::Right, 26)),
            vec!["[right] #26 is not among the suggestions"]
        );
    }

    #[test]
    fn no_matches_marker_is_printed() {
        let mut app = ready_app(sample_entities());
        app.handle(Command::Search(Slot::Right, "zzz".to_string()));
        assert_eq!(app.advance(ms(300)), vec!["[right] No matches found"]);
    }

    #[test]
    fn single_entry_game_is_solved_first_try() {
        let mut app = ready_app(vec![Entity::new(151, "Mew", &["psychic"])]);
        app.handle(Command::Search(Slot::Game, "mew".to_string()));
        app.advance(ms(300));
        app.handle(Command::Enter(Slot::Game, 151));
        assert_eq!(
            app.handle(Command::Submit),
            vec!["[game] Correct [green] (guesses: 1)"]
        );

        let out = app.handle(Command::Submit);
        assert!(out[0].contains("Solved"));
        assert!(out[0].contains("guesses 1"));

        // A solved game takes no further picks.
        app.handle(Command::Search(Slot::Game, "mew".to_string()));
        assert_eq!(app.advance(ms(300)), vec!["[game]   #151 Mew"]);
        let out = app.handle(Command::Pick(Slot::Game, 151));
        assert!(out[0].starts_with("[game] Solved"), "{out:?}");
        assert!(!out[0].contains("Selected"));
    }

    #[test]
    fn revert_and_settled_search_both_print() {
        let mut app = (0..16)
            .map(|seed| {
                let mut app = seeded_app(sample_entities(), seed);
                app.handle(Command::Search(Slot::Game, "bulba".to_string()));
                app.advance(ms(300));
                app.handle(Command::Pick(Slot::Game, 1));
                let out = app.handle(Command::Submit);
                (app, out)
            })
            .find(|(_, out)| out[0].starts_with("[game] Higher [red]"))
            .map(|(app, _)| app)
            .expect("some seed must not target Bulbasaur");

        assert!(app.advance(ms(800)).is_empty());
        app.handle(Command::Search(Slot::Game, "char".to_string()));
        assert_eq!(
            app.advance(ms(300)),
            vec![
                "[game]   #4 Charmander",
                "[game]   #5 Charmeleon",
                "[game]   #6 Charizard",
                "[game] GUESS",
            ]
        );
    }

    #[test]
    fn favourites_are_persisted_and_paged() {
        let mut app = ready_app(sample_entities());
        assert_eq!(app.handle(Command::Favs), vec![EMPTY_FAVOURITES_LABEL]);
        app.handle(Command::Fav(25));
        app.handle(Command::Toggle(1));
        assert_eq!(app.handle(Command::Fav(25)), vec!["#25 added to favourites (2)"]);

        let out = app.handle(Command::Favs);
        assert!(out[0].starts_with("#025 Pikachu *"));
        assert!(out[1].starts_with("#001 Bulbasaur *"));

        assert_eq!(app.handle(Command::Unfav(25)), vec!["#25 not in favourites (1)"]);
        assert_eq!(app.favourites.ids(), &[1]);
    }
}
