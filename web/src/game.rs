use crate::settings::{Settings, SettingsView};
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Interval;
use numerito_core as game;
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Cadence of the progress ticker driving the round engine.
const PROGRESS_TICK_MS: u32 = 5;

/// One started round: the engine plus view-side bookkeeping that dies with
/// it. Abandoning a round drops this whole value, so a tick arriving late can
/// never touch discarded state.
struct Round {
    engine: game::RoundEngine,
    outcome_seen: bool,
    entry_refs: Vec<NodeRef>,
    last_focus: Option<game::SlotIndex>,
}

impl Round {
    fn new(engine: game::RoundEngine) -> Self {
        let entry_refs = (0..engine.len()).map(|_| NodeRef::default()).collect();
        Self {
            engine,
            outcome_seen: false,
            entry_refs,
            last_focus: None,
        }
    }

    /// Reports a finished round exactly once, so win/fail handling (score
    /// persistence, celebration) cannot re-fire on later ticks.
    fn take_fresh_outcome(&mut self) -> Option<game::Phase> {
        if self.engine.is_finished() && !self.outcome_seen {
            self.outcome_seen = true;
            Some(self.engine.phase())
        } else {
            None
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CardMsg {
    slot: game::SlotIndex,
    text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    Start,
    Abandon,
    Tick,
    Entry(CardMsg),
    ToggleSettings,
    UpdateSettings(Settings),
}

fn card_classes(state: game::SlotState, shaking: bool) -> Classes {
    use game::SlotState::*;
    let mut class = classes!(
        "card",
        match state {
            Hidden => classes!(),
            Revealed | AwaitingInput | Correct | Incorrect => classes!("flip"),
        }
    );
    if shaking {
        class.push("shake");
    }
    class
}

fn card_back_classes(state: game::SlotState) -> Classes {
    use game::SlotState::*;
    classes!(
        "card-back",
        match state {
            Hidden | Revealed => classes!(),
            AwaitingInput => classes!("empty"),
            Correct => classes!("correct"),
            Incorrect => classes!("incorrect"),
        }
    )
}

fn start_label(phase: Option<game::Phase>) -> &'static str {
    match phase {
        None => "Start",
        Some(game::Phase::Failed) => "Try Again",
        Some(_) => "Restart",
    }
}

fn format_secs(millis: game::Millis) -> String {
    format!("{:.2}", millis as f64 / 1000.0)
}

fn best_score_text(best: Option<game::Score>) -> String {
    match best {
        Some(best) => format!("High Score: {best}s/d"),
        None => "No record yet".to_string(),
    }
}

/// The reference renders the record as a bar fraction of the 3 s/d deadline
/// rate, capped at the full width.
fn best_marker_width(best: game::Score) -> String {
    format!("{:.1}%", (best.secs_per_digit() * 100.0 / 3.0).min(100.0))
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::SlotIndex,
    state: game::SlotState,
    target: game::Value,
    entry: AttrValue,
    digits: game::DigitWidth,
    shaking: bool,
    /// Whether the recall phase is running and the card hosts an input.
    active: bool,
    input_ref: NodeRef,
    callback: Callback<CardMsg>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        index,
        state,
        target,
        entry,
        digits,
        shaking,
        active,
        input_ref,
        callback,
    } = props.clone();

    let class = card_classes(state, shaking);
    let back_class = card_back_classes(state);

    let oninput = Callback::from(move |e: InputEvent| {
        let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
            return;
        };
        let text = input.value();
        log::trace!("slot {} changed to {:?}", index, text);
        callback.emit(CardMsg { slot: index, text });
    });

    html! {
        <div {class}>
            <div class="card-inner">
                <div class="card-front"/>
                <div class={back_class}>
                    if active {
                        <input
                            ref={input_ref}
                            class="entry"
                            inputmode="numeric"
                            maxlength={digits.to_string()}
                            value={entry}
                            disabled={state.is_correct()}
                            {oninput}
                        />
                    } else if state == game::SlotState::Revealed {
                        <span class="value">{ target }</span>
                    }
                </div>
            </div>
        </div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq, Default)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    pub seed: Option<String>,
}

pub(crate) struct GameView {
    settings: Settings,
    round: Option<Round>,
    best: Option<game::Score>,
    celebrating: bool,
    settings_open: bool,
    forced_seed: Option<u64>,
    _ticker: Interval,
}

impl GameView {
    fn create_ticker(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(PROGRESS_TICK_MS, move || link.send_message(Msg::Tick))
    }

    fn seed(&self) -> u64 {
        self.forced_seed.unwrap_or_else(js_random_seed)
    }

    fn start_round(&mut self) {
        use game::SequenceGenerator;

        let config = self.settings.game_config();
        let sequence = game::RandomSequenceGenerator::new(self.seed()).generate(config);

        match game::RoundEngine::new(config, sequence, self.seed(), now_ms()) {
            Ok(engine) => {
                log::debug!("round started: {:?}", config);
                self.best = load_best_score();
                self.celebrating = false;
                self.round = Some(Round::new(engine));
            }
            Err(err) => {
                log::error!("could not start round: {}", err);
                self.round = None;
            }
        }
    }

    /// Runs once per finished round: persists an improved score and latches
    /// the celebration.
    fn handle_outcome(&mut self) -> bool {
        let Some(round) = self.round.as_mut() else {
            return false;
        };
        let Some(phase) = round.take_fresh_outcome() else {
            return false;
        };

        if let game::Phase::Won { elapsed } = phase {
            log::info!("round won in {}ms", elapsed);
            if let Some(score) = round.engine.score() {
                if score.improves_on(self.best) {
                    save_best_score(score);
                    self.best = Some(score);
                    self.celebrating = true;
                    log::info!("new high score: {}s/d", score);
                }
            }
        }
        true
    }

    fn view_progress(&self, now: game::Millis) -> Html {
        let Some(engine) = self.round.as_ref().map(|round| &round.engine) else {
            return Html::default();
        };
        if !engine.phase().is_recall() {
            return Html::default();
        }

        let fraction = f64::from(engine.progress(now));
        let bar_class = classes!(
            "progress-bar",
            engine.is_urgent(now).then_some("urgent")
        );
        let bar_style = format!("width: {:.2}%", fraction * 100.0);
        let marker = self
            .best
            .map(|best| {
                let style = format!("width: {}", best_marker_width(best));
                html! {
                    <div class="high-score-bar" {style}>
                        <div class="tooltip">{ best_score_text(Some(best)) }</div>
                    </div>
                }
            })
            .unwrap_or_default();

        html! {
            <div id="progress-container">
                <div class={bar_class} style={bar_style}/>
                { marker }
            </div>
        }
    }

    fn view_board(&self, ctx: &Context<Self>, round: &Round) -> Html {
        let phase = round.engine.phase();
        match phase {
            game::Phase::Won { elapsed } => self.view_win(elapsed, &round.engine),
            game::Phase::Failed => html! {
                <div class="fail-message">{"Time's up!"}</div>
            },
            _ => {
                let active = phase.is_recall();
                let digits = round.engine.config().digits;
                let callback = ctx.link().callback(Msg::Entry);
                html! {
                    <div class="board">
                        {
                            for round.engine.slots().iter().enumerate().map(|(ix, slot)| {
                                let index = ix as game::SlotIndex;
                                html! {
                                    <CardView
                                        {index}
                                        state={slot.state()}
                                        target={slot.target()}
                                        entry={AttrValue::from(slot.entry().to_string())}
                                        {digits}
                                        shaking={slot.is_shaking()}
                                        {active}
                                        input_ref={round.entry_refs[ix].clone()}
                                        callback={callback.clone()}
                                    />
                                }
                            })
                        }
                    </div>
                }
            }
        }
    }

    fn view_win(&self, elapsed: game::Millis, engine: &game::RoundEngine) -> Html {
        let Some(score) = engine.score() else {
            return Html::default();
        };
        html! {
            <>
                <div class="win-message">
                    { format!(
                        "Congratulations! You completed the game in {} seconds. Your score: {}s/d.",
                        format_secs(elapsed),
                        score,
                    ) }
                </div>
                if self.celebrating {
                    <div class="confetti" aria-hidden="true">
                        { for (0..24).map(|i| html! { <i style={format!("--n: {i}")}/> }) }
                    </div>
                    <div class="tooltip-hs">{ format!("New High Score: {score}s/d") }</div>
                }
            </>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let forced_seed = ctx
            .props()
            .seed
            .as_deref()
            .and_then(|seed| seed.parse().ok());
        Self {
            settings: LocalOrDefault::local_or_default(),
            round: None,
            best: load_best_score(),
            celebrating: false,
            settings_open: false,
            forced_seed,
            _ticker: GameView::create_ticker(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Start => {
                self.settings = self.settings.clamped();
                self.start_round();
                true
            }
            Abandon => {
                log::debug!("round abandoned");
                self.celebrating = false;
                self.round.take().is_some()
            }
            Tick => {
                let now = now_ms();
                let ticked = match self.round.as_mut() {
                    Some(round) => round.engine.tick(now),
                    None => return false,
                };
                let outcome = self.handle_outcome();
                let repaint = self
                    .round
                    .as_ref()
                    .is_some_and(|round| round.engine.phase().is_recall());
                ticked || outcome || repaint
            }
            Entry(CardMsg { slot, text }) => {
                let now = now_ms();
                let entered = match self.round.as_mut() {
                    Some(round) => match round.engine.input_changed(slot, &text, now) {
                        Ok(outcome) => outcome.has_update(),
                        Err(err) => {
                            log::debug!("input for slot {} ignored: {}", slot, err);
                            false
                        }
                    },
                    None => false,
                };
                let outcome = self.handle_outcome();
                entered || outcome
            }
            ToggleSettings => {
                self.settings_open = !self.settings_open;
                if !self.settings_open {
                    self.settings = LocalOrDefault::local_or_default();
                }
                true
            }
            UpdateSettings(settings) => {
                if self.settings != settings {
                    self.settings = settings;
                    self.settings.local_save();
                    true
                } else {
                    false
                }
            }
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        // keep the browser focus on the slot the engine considers focused
        let Some(round) = self.round.as_mut() else {
            return;
        };
        let focus = round.engine.focused_slot();
        if focus == round.last_focus {
            return;
        }
        round.last_focus = focus;
        if let Some(ix) = focus {
            if let Some(input) = round.entry_refs[ix as usize].cast::<HtmlInputElement>() {
                let _ = input.focus();
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let phase = self.round.as_ref().map(|round| round.engine.phase());
        let mid_round = phase.is_some_and(|phase| !phase.is_finished());

        let cb_start = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Start
        });
        let cb_abandon = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Abandon
        });
        let cb_show_settings = ctx.link().callback(|_| ToggleSettings);
        let cb_settings = ctx.link().callback(UpdateSettings);

        let controls = if mid_round {
            html! { <button class="reset" onclick={cb_abandon}>{"Reset"}</button> }
        } else {
            html! {
                <button class="start" onclick={cb_start}>{ start_label(phase) }</button>
            }
        };

        let board = self
            .round
            .as_ref()
            .map(|round| self.view_board(ctx, round))
            .unwrap_or_default();

        html! {
            <div class="numerito">
                <small onclick={cb_show_settings}>{"···"}</small>
                <nav>
                    <aside>{ best_score_text(self.best) }</aside>
                    <span>{ controls }</span>
                    <aside>{ self.settings.mode.label() }</aside>
                </nav>
                { self.view_progress(now_ms()) }
                <div id="game-area">{ board }</div>
                <SettingsView
                    settings={self.settings}
                    open={self.settings_open}
                    disabled={mid_round}
                    onchange={cb_settings}
                />
            </div>
        }
    }
}
