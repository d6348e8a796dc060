//! Kite demo: a round timer, a key-press counter and a quit button.
//!
//! Press space to score until the timer runs out (game over), then click the
//! button or press escape to close. Settings come from `kite.json` when it
//! exists; labels need a TTF at `<asset_root>/fonts/demo.ttf` and are skipped
//! without one.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use kite_core::{
    load_config_from_path, Color, ComponentId, EngineConfig, Font, Image, Key, MouseBtn, Rect,
    Result, SignalKind, Timer,
};
use kite_game::entity::shared_rect;
use kite_game::{
    Button, ComponentInfo, Context, DesktopLauncher, Game, GameComponent, Object, Sprite, Text,
    GAME_OVER, START_RENDERING,
};

const CONFIG_PATH: &str = "kite.json";
const FONT_PATH: &str = "fonts/demo.ttf";
const FONT_SIZE: u32 = 28;
const ROUND_MILLIS: u64 = 30_000;
const BUTTON_SIZE: (i32, i32) = (220, 64);

fn load_font(ctx: &Context<'_>) -> Option<Font> {
    match ctx.assets().load_font(FONT_PATH, FONT_SIZE) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("{e} Labels are disabled.");
            None
        }
    }
}

fn label(ctx: &mut Context<'_>, font: &Font, source: &str, at: (i32, i32)) -> Result<Text> {
    let id = ctx.ids().object();
    Text::with_font(ctx.surface(), id, source, font.clone(), Color::WHITE, at, true)
}

/// Round timer plus the quit button.
struct Menu {
    info: ComponentInfo,
    timer: Timer,
    font: Option<Font>,
    countdown: Option<Text>,
    quit: Option<Button>,
    shown_secs: Option<u64>,
    over: bool,
}

impl Menu {
    fn new(id: ComponentId) -> Self {
        Self {
            info: ComponentInfo::named(id, "menu"),
            timer: Timer::from_millis(ROUND_MILLIS),
            font: None,
            countdown: None,
            quit: None,
            shown_secs: None,
            over: false,
        }
    }

    fn set_countdown(&mut self, ctx: &mut Context<'_>, source: &str) -> Result<()> {
        if let Some(countdown) = &mut self.countdown {
            countdown.set_source(ctx.surface(), source)?;
            let window = ctx.window_rect();
            countdown.move_to(window.w / 2, 40);
            countdown.center();
        }
        Ok(())
    }
}

impl GameComponent for Menu {
    fn info(&self) -> &ComponentInfo {
        &self.info
    }

    fn load_objects(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        let window = ctx.window_rect();
        let (w, h) = BUTTON_SIZE;
        let rect = Rect::new(window.w / 2 - w / 2, window.h - h - 40, w, h);
        let texture = ctx
            .surface()
            .create_texture(&Image::solid(1, 1, Color::rgb(70, 110, 200)))?;
        let sprite = Sprite::from_texture(ctx.ids().object(), texture, shared_rect(rect));
        let mut quit = Button::from_sprite(sprite, |ctx| {
            ctx.raise_signal(SignalKind::Close, "Quit button pressed");
            Ok(())
        });

        self.font = load_font(ctx);
        if let Some(font) = &self.font {
            quit.set_text(label(ctx, font, "Quit", (rect.x + w / 2, rect.y + h / 2))?);
            self.countdown = Some(label(ctx, font, "", (window.w / 2, 40))?);
        }
        self.quit = Some(quit);
        Ok(())
    }

    fn on_notify(
        &mut self,
        ctx: &mut Context<'_>,
        _sender: Option<ComponentId>,
        message: &str,
    ) -> Result<()> {
        match message {
            START_RENDERING => self.timer.reset(),
            GAME_OVER => {
                self.over = true;
                self.set_countdown(ctx, "Time is up!")?;
            }
            _ => {}
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        if let Some(quit) = &mut self.quit {
            quit.update();
        }
        if self.over {
            return Ok(());
        }
        if self.timer.is_ready() {
            ctx.raise_signal(SignalKind::GameOver, "round timer expired");
            return Ok(());
        }
        let secs = self.timer.time_left().as_secs();
        if self.shown_secs != Some(secs) {
            self.shown_secs = Some(secs);
            self.set_countdown(ctx, &format!("{secs}s left"))?;
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        if let Some(quit) = &self.quit {
            quit.draw(ctx.surface());
        }
        if let Some(countdown) = &self.countdown {
            countdown.draw(ctx.surface());
        }
        Ok(())
    }

    fn on_mouse_down(&mut self, _ctx: &mut Context<'_>, button: MouseBtn, x: i32, y: i32) -> Result<()> {
        if let (MouseBtn::Left, Some(quit)) = (button, &mut self.quit) {
            quit.on_mouse_down(x, y);
        }
        Ok(())
    }

    fn on_mouse_up(&mut self, ctx: &mut Context<'_>, button: MouseBtn, x: i32, y: i32) -> Result<()> {
        if let (MouseBtn::Left, Some(quit)) = (button, &mut self.quit) {
            quit.on_mouse_up(ctx, x, y)?;
        }
        Ok(())
    }

    fn close(&mut self) {
        log::info!("Menu closed after {:?}", self.timer.delay().saturating_sub(self.timer.time_left()));
    }
}

/// Counts space presses until game over.
struct Score {
    info: ComponentInfo,
    points: u32,
    text: Option<Text>,
    frozen: bool,
}

impl Score {
    fn new(id: ComponentId) -> Self {
        Self {
            info: ComponentInfo::named(id, "score"),
            points: 0,
            text: None,
            frozen: false,
        }
    }

    fn refresh(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        if let Some(text) = &mut self.text {
            text.set_source(ctx.surface(), format!("Score: {}", self.points))?;
        }
        Ok(())
    }
}

impl GameComponent for Score {
    fn info(&self) -> &ComponentInfo {
        &self.info
    }

    fn load_objects(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        if let Some(font) = load_font(ctx) {
            let window = ctx.window_rect();
            self.text = Some(label(ctx, &font, "Score: 0", (window.w / 2, window.h / 2))?);
        }
        Ok(())
    }

    fn on_notify(
        &mut self,
        _ctx: &mut Context<'_>,
        _sender: Option<ComponentId>,
        message: &str,
    ) -> Result<()> {
        if message == GAME_OVER {
            self.frozen = true;
            log::info!("Final score: {}", self.points);
        }
        Ok(())
    }

    fn on_key_down(&mut self, ctx: &mut Context<'_>, key: Key) -> Result<()> {
        if key == Key::Space && !self.frozen {
            self.points += 1;
            self.refresh(ctx)?;
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context<'_>) -> Result<()> {
        if let Some(text) = &self.text {
            text.draw(ctx.surface());
        }
        Ok(())
    }
}

fn load_config() -> EngineConfig {
    let path = Path::new(CONFIG_PATH);
    if !path.exists() {
        return EngineConfig::default();
    }
    match load_config_from_path(path) {
        Ok(config) => {
            log::info!("Loaded {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("{e}; using default settings");
            EngineConfig::default()
        }
    }
}

fn run() -> Result<()> {
    let config = load_config();
    let launcher = DesktopLauncher::new(config.asset_root.clone());
    let title = config.title.clone();
    let size = (!config.fullscreen).then_some((config.width, config.height));

    let mut game = Game::new(config);
    game.initialize(&launcher, &title, size)?;

    let menu = Rc::new(RefCell::new(Menu::new(game.ids().component())));
    let score = Rc::new(RefCell::new(Score::new(game.ids().component())));
    game.add_component(menu)?;
    game.add_component(score)?;

    game.setup()?;
    game.run()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Kite demo starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
