use gloo_timers::callback::{Interval, Timeout};
use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::info_modal::InfoModal;
use crate::config::{self, TimingConfig};
use crate::estimator::{format_usd, HOURLY_RATE, MAX_AGE, MIN_AGE};
use crate::interaction::{TimerCommand, TimerSlot};
use crate::state::{Action, CalculatorState};
use crate::timers::{CancelHandle, TimerBank};
use crate::tooltip::Topic;

// Never read; the handle is held so that dropping it cancels the timer.
#[allow(dead_code)]
enum TimerHandle {
    Once(Timeout),
    Repeating(Interval),
}

impl TimerHandle {
    fn start(slot: TimerSlot, millis: u32, fire: impl FnMut() + 'static) -> Self {
        if slot.repeats() {
            TimerHandle::Repeating(Interval::new(millis, fire))
        } else {
            TimerHandle::Once(Timeout::new(millis, fire))
        }
    }
}

impl CancelHandle for TimerHandle {
    fn cancel(self) {
        // gloo clears the browser timer when the handle drops.
        drop(self);
    }
}

struct WindowListener {
    event: &'static str,
    closure: Closure<dyn Fn(Event)>,
}

impl WindowListener {
    fn attach(event: &'static str, callback: Callback<Event>) -> Option<Self> {
        let Some(window) = web_sys::window() else {
            warn!("No window, not listening for {}", event);
            return None;
        };
        let closure = Closure::<dyn Fn(Event)>::new(move |e: Event| callback.emit(e));
        match window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self { event, closure }),
            Err(err) => {
                warn!("Failed to listen for {}: {:?}", event, err);
                None
            }
        }
    }

    fn detach(self) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window
                .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
            {
                warn!("Failed to remove {} listener: {:?}", self.event, err);
            }
        }
    }
}

pub enum Msg {
    SliderInput(u8),
    Reset,
    Activity,
    KeyDown(String),
    Timer(TimerSlot, u32),
    OpenTooltip(Topic),
    CloseTooltip,
    TakeAction,
    DownloadGuide,
}

pub struct Calculator {
    state: CalculatorState,
    timers: TimerBank<TimerHandle>,
    timing: TimingConfig,
    listeners: Vec<WindowListener>,
}

impl Calculator {
    /// Applies an action and carries out the timer commands it produced.
    /// Returns whether anything visible changed.
    fn dispatch(&mut self, ctx: &Context<Self>, action: Action) -> bool {
        let before = self.state.clone();
        let commands = self.state.apply(action);
        self.run(ctx, commands);
        let changed = self.state != before;
        if changed {
            let interaction = self.state.interaction();
            debug!(
                "{:?}: age {}, phase {:?}, idle {}",
                action,
                self.state.age(),
                interaction.phase(),
                interaction.is_idle()
            );
        }
        changed
    }

    fn run(&mut self, ctx: &Context<Self>, commands: Vec<TimerCommand>) {
        for command in commands {
            match command {
                TimerCommand::Arm(slot) => {
                    let link = ctx.link().clone();
                    let millis = self.timing.delay(slot);
                    self.timers.arm(slot, move |generation| {
                        TimerHandle::start(slot, millis, move || {
                            link.send_message(Msg::Timer(slot, generation))
                        })
                    });
                }
                TimerCommand::Cancel(slot) => self.timers.cancel(slot),
            }
        }
    }
}

impl Component for Calculator {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let on_activity = ctx.link().callback(|_: Event| Msg::Activity);
        let on_keydown = ctx.link().callback(|e: Event| {
            let key = e
                .dyn_ref::<KeyboardEvent>()
                .map(|k| k.key())
                .unwrap_or_default();
            Msg::KeyDown(key)
        });

        let listeners = [("mousemove", on_activity), ("keydown", on_keydown)]
            .into_iter()
            .filter_map(|(event, callback)| WindowListener::attach(event, callback))
            .collect();

        let mut calculator = Self {
            state: CalculatorState::default(),
            timers: TimerBank::default(),
            timing: config::timing(),
            listeners,
        };
        let commands = calculator.state.apply(Action::Mounted);
        calculator.run(ctx, commands);
        calculator
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let action = match msg {
            Msg::SliderInput(age) => Action::SliderMoved(age),
            Msg::Reset => Action::Reset,
            Msg::Activity => Action::Activity,
            Msg::KeyDown(key) => Action::KeyPressed { escape: key == "Escape" },
            Msg::Timer(slot, generation) => {
                if !self.timers.accept(slot, generation) {
                    debug!("Ignoring stale {:?} timer", slot);
                    return false;
                }
                Action::TimerFired(slot)
            }
            Msg::OpenTooltip(topic) => Action::OpenTooltip(topic),
            Msg::CloseTooltip => Action::CloseTooltip,
            Msg::TakeAction => {
                info!("Take action clicked at age {}", self.state.age());
                return false;
            }
            Msg::DownloadGuide => {
                // Document generation lives outside this widget.
                info!("Downloading 2025 Planning Guide PDF");
                return false;
            }
        };
        self.dispatch(ctx, action)
    }

    fn destroy(&mut self, ctx: &Context<Self>) {
        let commands = self.state.apply(Action::Unmounted);
        self.run(ctx, commands);
        let leftover = self.timers.armed_count();
        if leftover > 0 {
            warn!("{} timers survived teardown", leftover);
            self.timers.cancel_all();
        }
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let estimate = self.state.estimate();
        let interaction = self.state.interaction();
        let pulse = interaction.pulse_active();

        let oninput = link.batch_callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            input.value().parse::<u8>().ok().map(Msg::SliderInput)
        });
        let info = |topic: Topic, label: &'static str| {
            html! {
                <button
                    class="info-icon"
                    aria-label={label}
                    onclick={link.callback(move |_: MouseEvent| Msg::OpenTooltip(topic))}
                >
                    {"i"}
                </button>
            }
        };
        let metric_class = classes!("metric", pulse.then(|| "pulse"));

        html! {
            <main class="calculator-page">
                <div class={classes!(
                    "calculator-card",
                    pulse.then(|| "pulse"),
                    interaction.is_idle().then(|| "wobble"),
                    self.state.tooltip().is_open().then(|| "dimmed")
                )}>
                    <h1>{"Estate Planning Calculator"}</h1>

                    <div class="metrics">
                        <div class={metric_class.clone()}>
                            <div class="metric-value">{estimate.age.to_string()}</div>
                            <div class="metric-label">
                                {"Your Age"}
                                {info(Topic::Age, "About age")}
                                <div class="metric-note">{format!("{} est. cost", format_usd(estimate.attorney_cost))}</div>
                            </div>
                        </div>
                        <div class={metric_class.clone()}>
                            <div
                                class="metric-value metric-value--large"
                                style={format!("color: {};", estimate.family_cost_color())}
                            >
                                {format_usd(estimate.family_cost)}
                            </div>
                            <div class="metric-label">
                                {"Family Cost"}
                                {info(Topic::FamilyCost, "About family cost")}
                                <div class="metric-note">{"Without planning"}</div>
                            </div>
                        </div>
                        <div class={metric_class.clone()}>
                            <div class="metric-value">{estimate.attorney_hours.to_string()}</div>
                            <div class="metric-label">
                                {"Attorney Hours"}
                                {info(Topic::AttorneyCost, "About attorney cost")}
                                <div class="metric-note">{format!("{}/hr", format_usd(HOURLY_RATE))}</div>
                            </div>
                        </div>
                    </div>

                    <div class="slider-row">
                        <input
                            type="range"
                            class="age-slider"
                            min={MIN_AGE.to_string()}
                            max={MAX_AGE.to_string()}
                            step="1"
                            value={self.state.age().to_string()}
                            {oninput}
                        />
                        <div class="reset-row">
                            <button class="reset-button" onclick={link.callback(|_: MouseEvent| Msg::Reset)}>
                                {"↻ Reset"}
                            </button>
                        </div>
                    </div>

                    <div class="life-stage">
                        <div class="life-stage-label">{format!("Life Stage: {}", estimate.life_stage.label())}</div>
                        <div class="life-stage-hint">{"Adjust your age to see how estate planning needs evolve"}</div>
                    </div>

                    {
                        if interaction.has_ever_interacted() {
                            html! {
                                <div class="actions">
                                    <button
                                        class={classes!("action-button", "action-button--primary", pulse.then(|| "pulse"))}
                                        onclick={link.callback(|_: MouseEvent| Msg::TakeAction)}
                                    >
                                        {"Take Action Now"}
                                    </button>
                                    <button
                                        class={classes!("action-button", "action-button--secondary", pulse.then(|| "pulse"))}
                                        onclick={link.callback(|_: MouseEvent| Msg::DownloadGuide)}
                                    >
                                        {"Download 2025 Guide"}
                                    </button>
                                </div>
                            }
                        } else {
                            html! {}
                        }
                    }
                </div>

                {
                    if let Some(topic) = self.state.tooltip().current() {
                        html! {
                            <InfoModal {topic} on_close={link.callback(|_: ()| Msg::CloseTooltip)} />
                        }
                    } else {
                        html! {}
                    }
                }

                <style>
                    {r#"
                    .calculator-page {
                        display: flex;
                        min-height: 100vh;
                        align-items: center;
                        justify-content: center;
                        padding: 1rem;
                        background: #111827;
                        font-family: Inter, -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
                    }

                    .calculator-card {
                        width: 100%;
                        max-width: 640px;
                        padding: 2rem;
                        border-radius: 1.5rem;
                        border: 1px solid #374151;
                        background: linear-gradient(to bottom, #1f2937, #374151);
                        box-shadow: 0 20px 50px rgba(17, 24, 39, 0.4);
                        color: #f9fafb;
                        transition: transform 0.3s ease-in-out, opacity 0.3s ease-in-out, filter 0.3s ease-in-out;
                    }

                    .calculator-card h1 {
                        text-align: center;
                        font-size: 1.875rem;
                        margin-bottom: 2rem;
                    }

                    .calculator-card.pulse {
                        transform: scale(1.02);
                    }

                    .calculator-card.wobble {
                        animation: wobble 1s ease-in-out;
                    }

                    .calculator-card.dimmed {
                        opacity: 0.4;
                        filter: blur(2px);
                    }

                    @keyframes wobble {
                        0%, 100% { transform: rotate(0deg); }
                        25% { transform: rotate(-1deg); }
                        75% { transform: rotate(1deg); }
                    }

                    .metrics {
                        display: grid;
                        grid-template-columns: repeat(3, 1fr);
                        gap: 1.5rem;
                        margin-bottom: 2rem;
                        text-align: center;
                    }

                    .metric {
                        transition: transform 0.3s ease-in-out;
                    }

                    .metric.pulse {
                        transform: scale(1.05);
                    }

                    .metric-value {
                        font-size: 1.875rem;
                        font-weight: bold;
                    }

                    .metric-value--large {
                        font-size: 3rem;
                        margin-bottom: 0.5rem;
                    }

                    .metric-label {
                        font-size: 0.875rem;
                        color: #d1d5db;
                    }

                    .metric-note {
                        font-size: 0.75rem;
                    }

                    .info-icon {
                        margin-left: 0.35rem;
                        width: 1.1rem;
                        height: 1.1rem;
                        border-radius: 50%;
                        border: 1px solid #9ca3af;
                        background: transparent;
                        color: #9ca3af;
                        font-size: 0.7rem;
                        cursor: pointer;
                    }

                    .age-slider {
                        width: 100%;
                        accent-color: #9333ea;
                    }

                    .reset-row {
                        display: flex;
                        justify-content: flex-end;
                    }

                    .reset-button {
                        background: none;
                        border: none;
                        color: #9ca3af;
                        font-size: 0.75rem;
                        cursor: pointer;
                    }

                    .reset-button:hover {
                        color: #e5e7eb;
                    }

                    .life-stage {
                        text-align: center;
                        margin-bottom: 1.5rem;
                    }

                    .life-stage-label {
                        font-size: 1.25rem;
                        font-weight: 600;
                        margin-bottom: 0.5rem;
                    }

                    .life-stage-hint {
                        font-size: 0.875rem;
                        color: #d1d5db;
                    }

                    .actions {
                        display: grid;
                        grid-template-columns: repeat(2, 1fr);
                        gap: 1.5rem;
                    }

                    .action-button {
                        width: 100%;
                        padding: 0.75rem;
                        border: none;
                        border-radius: 0.375rem;
                        color: #f9fafb;
                        font-size: 1.125rem;
                        cursor: pointer;
                        transition: transform 0.3s, background 0.3s;
                    }

                    .action-button.pulse {
                        transform: scale(1.05);
                    }

                    .action-button--primary { background: #9333ea; }
                    .action-button--primary:hover { background: #7e22ce; }
                    .action-button--secondary { background: #2563eb; }
                    .action-button--secondary:hover { background: #1d4ed8; }

                    .info-backdrop {
                        position: fixed;
                        inset: 0;
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        background: rgba(0, 0, 0, 0.5);
                        z-index: 50;
                    }

                    .info-dialog {
                        position: relative;
                        max-width: 420px;
                        padding: 1.5rem;
                        border-radius: 1rem;
                        background: #1f2937;
                        color: #f9fafb;
                        box-shadow: 0 16px 32px rgba(0, 0, 0, 0.3);
                    }

                    .info-close {
                        position: absolute;
                        top: 0.75rem;
                        right: 0.75rem;
                        background: none;
                        border: none;
                        color: #9ca3af;
                        font-size: 1.25rem;
                        cursor: pointer;
                    }

                    @media (max-width: 600px) {
                        .metrics {
                            grid-template-columns: 1fr;
                        }
                        .actions {
                            grid-template-columns: 1fr;
                        }
                    }
                    "#}
                </style>
            </main>
        }
    }
}
