use crate::scheduler::GlooScheduler;
use crate::utils::*;
use concentration_core as game;
use gloo::timers::callback::Timeout;
use yew::prelude::*;

const WELCOME_TEXT: &str = "Welcome to Memory Game";
const WELCOME_STEP_MS: u32 = 100;
const WELCOME_HOLD_MS: u32 = 1000;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Section {
    Welcome,
    Settings,
    Board,
}

/// Delay and message that follow a welcome step showing `shown` characters.
fn welcome_next(shown: usize) -> (u32, Msg) {
    if shown < WELCOME_TEXT.chars().count() {
        (WELCOME_STEP_MS, Msg::WelcomeStep)
    } else {
        (WELCOME_HOLD_MS, Msg::ShowSettings)
    }
}

/// Tiles take clicks only while running and before a pair is face up.
fn accepts_reveals(snapshot: &game::SessionSnapshot) -> bool {
    let face_up = snapshot.tiles.iter().filter(|tile| tile.revealed).count();
    snapshot.status.is_running() && face_up < 2
}

/// Grid picked in the settings section, waiting for a time limit.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
struct Picker {
    size: Option<game::GridSize>,
}

impl Picker {
    /// Returns whether the selection changed.
    fn select_size(&mut self, size: game::GridSize) -> bool {
        self.size.replace(size) != Some(size)
    }

    fn config(&self, time_limit_secs: game::Seconds) -> Option<game::SessionConfig> {
        self.size
            .map(|grid| game::SessionConfig::new(grid, time_limit_secs))
    }

    fn reset(&mut self) {
        self.size = None;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    WelcomeStep,
    ShowSettings,
    SelectSize(game::GridSize),
    SelectTime(game::Seconds),
    RevealTile(game::TileId),
    Timer(game::TimerEvent),
    Restart,
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    tile: game::TileSnapshot,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::TileId>,
}

#[function_component(TileView)]
fn tile_component(props: &TileProps) -> Html {
    let TileProps {
        tile,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "tile",
        tile.revealed.then_some("revealed"),
        tile.matched.then_some("matched"),
        locked.then_some("locked"),
    );
    let face = if tile.is_face_up() {
        symbol_glyph(tile.symbol)
    } else {
        ""
    };

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("tile {} clicked", tile.id);
        callback.emit(tile.id);
    });

    html! {
        <button {class} {onclick} disabled={locked}>{face}</button>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[prop_or_default]
    pub seed: Option<u64>,
}

pub(crate) struct GameView {
    engine: game::Engine<GlooScheduler>,
    section: Section,
    picker: Picker,
    welcome_len: usize,
    _section_timer: Option<Timeout>,
}

impl GameView {
    fn send_later(ctx: &Context<Self>, millis: u32, msg: Msg) -> Timeout {
        let link = ctx.link().clone();
        Timeout::new(millis, move || link.send_message(msg))
    }

    fn view_welcome(&self) -> Html {
        let text: String = WELCOME_TEXT.chars().take(self.welcome_len).collect();

        html! {
            <section class="welcome">
                <h1>{text}<span class="caret"/></h1>
            </section>
        }
    }

    fn view_settings(&self, ctx: &Context<Self>) -> Html {
        let sizes = game::GridSize::ALL.into_iter().map(|size| {
            let class = classes!(
                "choice",
                (self.picker.size == Some(size)).then_some("selected")
            );
            let onclick = ctx.link().callback(move |_| Msg::SelectSize(size));
            html! {
                <button {class} {onclick}>{size.label()}</button>
            }
        });

        let times = self.picker.size.map_or_else(Html::default, |size| {
            let limits = size.time_limits().into_iter().map(|secs| {
                let onclick = ctx.link().callback(move |_| Msg::SelectTime(secs));
                html! {
                    <button class="choice" {onclick}>{format_time_limit(secs)}</button>
                }
            });
            html! {
                <>
                    <h2>{"Time limit"}</h2>
                    <nav>{ for limits }</nav>
                </>
            }
        });

        html! {
            <section class="settings">
                <h2>{"Grid size"}</h2>
                <nav>{ for sizes }</nav>
                {times}
            </section>
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let snapshot = self.engine.snapshot();
        let playable = accepts_reveals(&snapshot);
        let columns = snapshot
            .grid
            .map_or(game::COLUMNS, |grid| grid.columns());

        let callback = ctx.link().callback(Msg::RevealTile);
        let tiles = snapshot.tiles.iter().map(|&tile| {
            let locked = !playable || tile.is_face_up();
            html! {
                <TileView key={tile.id.to_string()} {tile} {locked} callback={callback.clone()}/>
            }
        });

        let limit = match snapshot.time_limit_secs {
            game::UNLIMITED => "--:--".to_string(),
            secs => format_clock(secs),
        };
        let grid_class = classes!("grid", snapshot.start_pending.then_some("dealing"));
        let grid_style = format!("grid-template-columns: repeat({}, 1fr)", columns);
        let cb_restart = ctx.link().callback(|_| Msg::Restart);

        html! {
            <section class="board">
                <nav>
                    <aside>{format!("Moves: {}", snapshot.move_count)}</aside>
                    <aside>{format!("Time: {} / {}", format_clock(snapshot.elapsed_secs), limit)}</aside>
                    <button onclick={cb_restart}>{"Restart"}</button>
                </nav>
                <div class={grid_class} style={grid_style}>
                    { for tiles }
                </div>
                {self.view_result(ctx, &snapshot)}
            </section>
        }
    }

    fn view_result(&self, ctx: &Context<Self>, snapshot: &game::SessionSnapshot) -> Html {
        use game::SessionStatus::*;

        let (title, details) = match snapshot.status {
            Won => (
                "You won!",
                format!(
                    "Time taken: {}, moves: {}",
                    format_clock(snapshot.final_elapsed_secs.unwrap_or(snapshot.elapsed_secs)),
                    snapshot.move_count
                ),
            ),
            Lost => (
                "Time's up!",
                format!(
                    "Matched {} of {} tiles in {} moves",
                    snapshot.matched_count(),
                    snapshot.tiles.len(),
                    snapshot.move_count
                ),
            ),
            Idle | Configuring | Running => return Html::default(),
        };
        let cb_restart = ctx.link().callback(|_| Msg::Restart);

        html! {
            <dialog open={true}>
                <article>
                    <h2>{title}</h2>
                    <p>{details}</p>
                    <footer>
                        <button onclick={cb_restart}>{"Play again"}</button>
                    </footer>
                </article>
            </dialog>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        log::debug!("engine seed: {}", seed);

        let scheduler = GlooScheduler::new(ctx.link().callback(Msg::Timer));
        Self {
            engine: game::Engine::new(scheduler, seed),
            section: Section::Welcome,
            picker: Picker::default(),
            welcome_len: 0,
            _section_timer: Some(Self::send_later(ctx, WELCOME_STEP_MS, Msg::WelcomeStep)),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            WelcomeStep => {
                self.welcome_len += 1;
                let (delay, next) = welcome_next(self.welcome_len);
                self._section_timer = Some(Self::send_later(ctx, delay, next));
                true
            }
            ShowSettings => {
                self._section_timer = None;
                self.section = Section::Settings;
                true
            }
            SelectSize(size) => {
                log::debug!("selected size: {}", size);
                self.picker.select_size(size)
            }
            SelectTime(secs) => {
                let Some(config) = self.picker.config(secs) else {
                    return false;
                };
                log::debug!("selected time limit: {}s", secs);
                let outcome = self.engine.configure(config);
                if outcome.has_update() {
                    self.section = Section::Board;
                }
                outcome.has_update()
            }
            RevealTile(id) => {
                let outcome = self.engine.reveal_tile(id);
                log::debug!("reveal {}: {:?}", id, outcome);
                outcome.has_update()
            }
            Timer(event) => self.engine.handle_timer(event),
            Restart => {
                log::debug!("restart from {:?}", self.engine.status());
                self.engine.restart();
                self.picker.reset();
                self.section = Section::Settings;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let content = match self.section {
            Section::Welcome => self.view_welcome(),
            Section::Settings => self.view_settings(ctx),
            Section::Board => self.view_board(ctx),
        };

        html! {
            <main class="concentration">{content}</main>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::{Engine, GridSize, SessionConfig, Timing, VirtualClock};
    use std::time::Duration;

    #[test]
    fn welcome_types_every_character_then_holds() {
        let mut shown = 0;
        let mut steps = 0;
        loop {
            shown += 1;
            let (delay, next) = welcome_next(shown);
            if next == Msg::ShowSettings {
                assert_eq!(delay, WELCOME_HOLD_MS);
                break;
            }
            assert_eq!(delay, WELCOME_STEP_MS);
            steps += 1;
        }

        assert_eq!(shown, WELCOME_TEXT.chars().count());
        assert_eq!(steps + 1, shown);
    }

    #[test]
    fn picker_reports_only_changes() {
        let mut picker = Picker::default();
        assert_eq!(picker.config(30), None);

        assert!(picker.select_size(GridSize::Medium));
        assert!(!picker.select_size(GridSize::Medium));
        assert!(picker.select_size(GridSize::Small));
        assert_eq!(
            picker.config(30),
            Some(SessionConfig::new(GridSize::Small, 30))
        );

        picker.reset();
        assert_eq!(picker, Picker::default());
    }

    #[test]
    fn board_locks_while_dealing_comparing_and_after_restart() {
        let mut engine = Engine::new(VirtualClock::new(), 7);
        engine.configure(SessionConfig::new(GridSize::Small, 60));
        assert!(!accepts_reveals(&engine.snapshot()));

        engine.advance(Timing::DEFAULT_SETTLE);
        assert!(accepts_reveals(&engine.snapshot()));

        let first = engine.session().board()[0];
        let other = engine
            .session()
            .board()
            .iter()
            .find(|tile| tile.symbol != first.symbol)
            .map(|tile| tile.id)
            .unwrap();
        engine.reveal_tile(first.id);
        engine.reveal_tile(other);
        assert!(!accepts_reveals(&engine.snapshot()));

        engine.advance(Duration::from_secs(1));
        assert!(accepts_reveals(&engine.snapshot()));

        assert!(engine.restart());
        assert!(!accepts_reveals(&engine.snapshot()));
    }
}
