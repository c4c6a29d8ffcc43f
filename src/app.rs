use crate::chat::chat_manager::PAGE_SCROLL;
use crate::chat::{ChatManager, CompletionClient, QueryDispatcher, SubmitOutcome, Transcript};
use crate::event::{AppEvent, Event, EventHandler};
use ratatui::{
    DefaultTerminal,
    crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use color_eyre::Result;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Application.
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Everything said this session, oldest first.
    pub transcript: Transcript,
    /// Input line and scroll position
    pub chat_manager: ChatManager,
    /// Sends queries, one at a time
    pub dispatcher: QueryDispatcher,
    /// Event handler.
    pub events: EventHandler,
}

impl App {
    /// Constructs a new instance of [`App`] reading from the terminal.
    pub fn new(client: Arc<dyn CompletionClient>, system_prompt: &str) -> Self {
        Self::with_events(client, system_prompt, EventHandler::new())
    }

    pub fn with_events(
        client: Arc<dyn CompletionClient>,
        system_prompt: &str,
        events: EventHandler,
    ) -> Self {
        let dispatcher = QueryDispatcher::new(client, system_prompt, events.sender());
        Self {
            running: true,
            transcript: Transcript::new(),
            chat_manager: ChatManager::new(),
            dispatcher,
            events,
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
                needs_redraw = false;
            }

            match self.events.next().await? {
                Event::Tick => {} // Don't redraw on tick
                Event::Crossterm(event) => match event {
                    CrosstermEvent::Key(key_event) => {
                        self.handle_key_events(key_event);
                        needs_redraw = true;
                    }
                    CrosstermEvent::Resize(_, _) => needs_redraw = true,
                    _ => {}
                },
                Event::App(app_event) => {
                    self.handle_app_event(app_event);
                    needs_redraw = true;
                }
            }
        }
        info!("shutting down with {} transcript entries", self.transcript.len());
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) {
        if key_event.kind != KeyEventKind::Press {
            return;
        }

        match key_event.code {
            KeyCode::Char('c' | 'C') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                self.events.send(AppEvent::Quit)
            }
            KeyCode::Esc => self.events.send(AppEvent::Quit),
            KeyCode::Enter => self.events.send(AppEvent::Submit),
            KeyCode::Backspace => self.events.send(AppEvent::Backspace),
            KeyCode::Char(_)
                if key_event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {}
            KeyCode::Char(ch) => self.events.send(AppEvent::Input(ch)),
            KeyCode::Up => self.events.send(AppEvent::ScrollUp(1)),
            KeyCode::Down => self.events.send(AppEvent::ScrollDown(1)),
            KeyCode::PageUp => self.events.send(AppEvent::ScrollUp(PAGE_SCROLL)),
            KeyCode::PageDown => self.events.send(AppEvent::ScrollDown(PAGE_SCROLL)),
            _ => {}
        }
    }

    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Input(ch) => self.chat_manager.handle_input(ch),
            AppEvent::Backspace => self.chat_manager.backspace(),
            AppEvent::Submit => self.submit_chat_message(),
            AppEvent::ScrollUp(rows) => self.chat_manager.scroll_up(rows),
            AppEvent::ScrollDown(rows) => self.chat_manager.scroll_down(rows),
            AppEvent::ReplyReady(reply) => {
                self.dispatcher.complete(reply, &mut self.transcript);
                self.chat_manager.scroll_to_bottom();
            }
            AppEvent::Quit => self.quit(),
        }
    }

    pub fn submit_chat_message(&mut self) {
        let outcome = self
            .dispatcher
            .submit(self.chat_manager.get_input(), &mut self.transcript);

        match outcome {
            SubmitOutcome::Dispatched => {
                self.chat_manager.clear_input();
                self.chat_manager.scroll_to_bottom();
            }
            SubmitOutcome::Busy => debug!("still waiting on the previous reply"),
            SubmitOutcome::Ignored => {}
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.dispatcher.is_in_flight()
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        if self.is_waiting() {
            warn!("quitting with a request still outstanding, its reply is dropped");
        }
        self.running = false;
    }
}
