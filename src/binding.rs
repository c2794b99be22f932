//! `TerminalBinding`: the scheduler and event loop that ties the element
//! tree, pipeline owner, input parser, and terminal backend together.

use std::io;
use std::time::Duration;

use crate::buffer::Buffer;
use crate::canvas::TerminalCanvas;
use crate::component::Component;
use crate::element::ElementTree;
use crate::error::{Error, Result};
use crate::event::InputEvent;
use crate::geometry::{Constraints, Position, Rect, Size};
use crate::input::InputParser;
use crate::pipeline::PipelineOwner;
use crate::renderer::Renderer;
use crate::terminal::{
    Terminal, SEQ_CLEAR_SCREEN, SEQ_DISABLE_MOUSE, SEQ_ENABLE_MOUSE, SEQ_ENTER_ALT_SCREEN, SEQ_HIDE_CURSOR, SEQ_LEAVE_ALT_SCREEN,
    SEQ_SHOW_CURSOR,
};
use crate::tree_id::ElementId;

/// Ambient configuration for a [`TerminalBinding`].
pub struct BindingConfig {
    /// Sink for errors that would otherwise be swallowed as non-fatal: I/O
    /// failures during a frame, terminal-unavailable degradations, and the
    /// like. When absent, these are logged via `tracing::warn!` instead.
    pub on_error: Option<Box<dyn FnMut(&Error)>>,
    /// Upper bound on how long `run`'s blocking read may go without handling
    /// a newly-scheduled frame before checking again.
    pub idle_poll: Duration,
    /// Wrap each emitted frame in DEC synchronized output
    /// (`\x1b[?2026h`/`l`) so a partial redraw is never visible mid-paint.
    pub synchronized_output: bool,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            on_error: None,
            idle_poll: Duration::from_millis(16),
            synchronized_output: true,
        }
    }
}

/// Owns the root element, the pipeline owner, the input parser, and the
/// terminal backend; coalesces redraw requests and drives build/layout/paint/
/// emit each frame.
pub struct TerminalBinding<T: Terminal> {
    terminal: T,
    tree: ElementTree,
    pipeline: PipelineOwner,
    parser: InputParser,
    previous: Buffer,
    last_size: Size,
    renderer: Renderer,
    config: BindingConfig,
    subscribers: Vec<Box<dyn FnMut(&InputEvent)>>,
    frame_scheduled: bool,
    shutting_down: bool,
}

impl<T: Terminal> TerminalBinding<T> {
    /// Create a binding over `terminal`, not yet initialized.
    pub fn new(terminal: T, config: BindingConfig) -> Self {
        let renderer = Renderer::new(config.synchronized_output);
        Self {
            terminal,
            tree: ElementTree::new(),
            pipeline: PipelineOwner::new(),
            parser: InputParser::new(),
            previous: Buffer::new(Size::ZERO),
            last_size: Size::ZERO,
            renderer,
            config,
            subscribers: Vec::new(),
            frame_scheduled: false,
            shutting_down: false,
        }
    }

    /// The backend terminal.
    pub fn terminal(&self) -> &T {
        &self.terminal
    }

    /// The backend terminal, mutably.
    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }

    /// Whether [`TerminalBinding::shutdown`] has run.
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down
    }

    /// Whether a frame is currently scheduled (will run on the next `poll`/`run` tick).
    pub fn has_frame_scheduled(&self) -> bool {
        self.frame_scheduled
    }

    /// Register a callback that sees every routed input event (the broadcast
    /// stream applications subscribe to).
    pub fn subscribe(&mut self, callback: impl FnMut(&InputEvent) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Enter raw mode (if a TTY), the alternate screen, hide the cursor,
    /// clear, enable mouse tracking, and record the initial size.
    pub fn initialize(&mut self) -> Result<()> {
        if self.terminal.is_tty() {
            self.terminal.enter_raw_mode()?;
        }
        self.terminal.write(SEQ_ENTER_ALT_SCREEN.as_bytes())?;
        self.terminal.write(SEQ_HIDE_CURSOR.as_bytes())?;
        self.terminal.write(SEQ_CLEAR_SCREEN.as_bytes())?;
        for seq in SEQ_ENABLE_MOUSE {
            self.terminal.write(seq.as_bytes())?;
        }
        self.terminal.flush()?;
        self.last_size = self.terminal.size()?;
        self.previous = Buffer::new(self.last_size);
        Ok(())
    }

    /// Mount `component` as the root and schedule the first frame.
    pub fn attach_root(&mut self, component: Component) -> ElementId {
        let id = self.tree.set_root(component);
        self.schedule_frame();
        id
    }

    /// Arm a redraw. Any number of calls between two frames coalesce into one.
    pub fn schedule_frame(&mut self) {
        if !self.shutting_down {
            self.frame_scheduled = true;
        }
    }

    /// Build dirty elements, lay out and paint the root into a fresh buffer
    /// sized to the terminal, diff against the previous frame, and emit.
    pub fn draw_frame(&mut self) -> Result<()> {
        self.frame_scheduled = false;
        self.tree.build_dirty();
        let Some(root) = self.tree.root() else { return Ok(()) };

        let size = self.terminal.size()?;
        self.last_size = size;
        let mut buffer = Buffer::new(size);

        let constraints = Constraints::tight(size);
        self.pipeline.flush_layout(&mut self.tree, root, constraints);
        {
            let rect = Rect::new(0, 0, size.width, size.height);
            let mut canvas = TerminalCanvas::new(&mut buffer, rect);
            self.pipeline.flush_paint(&self.tree, &mut canvas, root);
        }

        for violation in self.tree.take_layout_violations() {
            self.report_error(&Error::Layout(format!(
                "element {:?} returned size {:?} outside constraints {:?}; clamped to {:?}",
                violation.element, violation.returned, violation.constraints, violation.clamped
            )));
        }

        self.emit(&buffer)?;
        self.previous = buffer;
        Ok(())
    }

    /// Diff `buffer` against the previous frame and write the batched ANSI
    /// for whatever changed, skipping the write entirely if nothing did.
    fn emit(&mut self, buffer: &Buffer) -> Result<()> {
        let changes = buffer.diff(&self.previous);
        if changes.is_empty() {
            return Ok(());
        }
        let out = self.renderer.render_batched(&changes);
        self.terminal.write(out.as_bytes())?;
        self.terminal.flush()
    }

    /// Feed raw bytes from the terminal into the input parser and route
    /// every complete event that results.
    pub fn feed_input(&mut self, bytes: &[u8]) -> Result<()> {
        self.parser.feed(bytes);
        while let Some(event) = self.parser.parse_next() {
            self.dispatch_event(event)?;
        }
        Ok(())
    }

    /// Resolve a pending lone-Escape (or drop a dead partial sequence) after
    /// an idle timeout; route the Escape event if that's what was pending.
    pub fn flush_idle_input(&mut self) -> Result<()> {
        if let Some(event) = self.parser.flush_idle() {
            self.dispatch_event(event)?;
        }
        Ok(())
    }

    fn dispatch_event(&mut self, event: InputEvent) -> Result<()> {
        for subscriber in &mut self.subscribers {
            subscriber(&event);
        }
        match &event {
            InputEvent::Key(key) if key.is_ctrl_c() || key.is_escape() => {
                self.shutdown()?;
                return Ok(());
            }
            InputEvent::Key(key) => {
                self.tree.dispatch_key(key);
            }
            InputEvent::Mouse(mouse) => {
                let point = Position::new(mouse.x, mouse.y);
                self.tree.dispatch_mouse(point, mouse);
            }
            InputEvent::Resize(w, h) => {
                self.last_size = Size::new(*w, *h);
                if let Some(root) = self.tree.root() {
                    self.tree.mark_dirty(root);
                }
            }
            _ => {}
        }
        self.schedule_frame();
        Ok(())
    }

    /// Run one turn: feed `bytes` (may be empty), then draw a frame if one
    /// was scheduled as a result.
    pub fn poll(&mut self, bytes: &[u8]) -> Result<()> {
        if !bytes.is_empty() {
            self.feed_input(bytes)?;
        }
        if self.frame_scheduled && !self.shutting_down {
            self.draw_frame()?;
        }
        Ok(())
    }

    fn report_error(&mut self, err: &Error) {
        if let Some(sink) = &mut self.config.on_error {
            sink(err);
        } else {
            tracing::warn!(error = %err, "binding error");
        }
    }

    /// Cancel timers/subscriptions, disable mouse tracking, restore cooked
    /// mode, show the cursor, and leave the alternate screen. Idempotent.
    pub fn shutdown(&mut self) -> Result<()> {
        if self.shutting_down {
            return Ok(());
        }
        self.shutting_down = true;
        self.frame_scheduled = false;
        for seq in SEQ_DISABLE_MOUSE {
            self.terminal.write(seq.as_bytes())?;
        }
        self.terminal.write(SEQ_SHOW_CURSOR.as_bytes())?;
        self.terminal.write(SEQ_LEAVE_ALT_SCREEN.as_bytes())?;
        self.terminal.flush()?;
        if self.terminal.is_tty() {
            self.terminal.leave_raw_mode()?;
        }
        Ok(())
    }

    /// Blocking driver atop [`TerminalBinding::poll`]: initializes, then
    /// reads from `input` until it's exhausted or `shutdown()` has run,
    /// feeding whatever arrives and drawing frames as they're scheduled.
    ///
    /// This is a synchronous stand-in for the single-threaded reactor
    /// described in the concurrency model: with no async runtime in the
    /// dependency stack, each read is a suspension point in place of a true
    /// non-blocking multiplexer, and `idle_poll` bounds how promptly a
    /// scheduled frame after a read is drawn rather than a sleep duration.
    pub fn run<R: io::Read>(&mut self, mut input: R) -> Result<()> {
        self.initialize()?;
        let mut chunk = [0u8; 1024];
        while !self.shutting_down {
            match input.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    if let Err(err) = self.feed_input(&chunk[..n]) {
                        self.report_error(&err);
                    }
                }
                Err(err) => self.report_error(&Error::Io(err)),
            }
            if self.frame_scheduled && !self.shutting_down {
                if let Err(err) = self.draw_frame() {
                    self.report_error(&err);
                }
            }
        }
        self.shutdown()
    }
}
