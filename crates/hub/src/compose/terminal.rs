use std::io::{self, Stdout, Write};

use crossterm::cursor::MoveTo;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste};
use crossterm::terminal::{
	self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{ExecutableCommand, QueueableCommand};
use hub_domain::model::InviteOutcome;
use hub_domain::repo::ParticipantRepository;
use tracing::{debug, warn};

use super::{Action, ComposeView};

/// Raw-mode alternate screen, restored on drop.
struct Screen {
	out: Stdout,
}

impl Screen {
	fn enter() -> io::Result<Self> {
		enable_raw_mode()?;
		let mut out = io::stdout();
		out.execute(EnterAlternateScreen)?;
		out.execute(EnableBracketedPaste)?;
		Ok(Self { out })
	}

	fn draw(&mut self, view: &ComposeView) -> io::Result<()> {
		let (width, _) = terminal::size()?;
		self.out.queue(Clear(ClearType::All))?;
		for (row, line) in view.render(usize::from(width)).iter().enumerate() {
			self.out.queue(MoveTo(0, row as u16))?;
			self.out.write_all(line.as_bytes())?;
		}
		self.out.flush()
	}
}

impl Drop for Screen {
	fn drop(&mut self) {
		let _ = self.out.execute(DisableBracketedPaste);
		let _ = self.out.execute(LeaveAlternateScreen);
		let _ = disable_raw_mode();
	}
}

/// Runs the composer until the user quits. Returns the outcome of every
/// successful submit.
pub async fn run(view: &mut ComposeView, repo: &dyn ParticipantRepository) -> io::Result<Vec<InviteOutcome>> {
	let mut screen = Screen::enter()?;
	let (_, rows) = terminal::size()?;
	view.resize(usize::from(rows));
	let mut sent = Vec::new();

	loop {
		screen.draw(view)?;
		match view.handle_event(&event::read()?) {
			Action::Continue => {}
			Action::Quit => break,
			Action::Submit => match view.form_mut().submit(repo).await {
				Ok(outcome) => {
					view.layout();
					view.set_status(outcome.summary());
					sent.push(outcome);
				}
				Err(err) => {
					warn!(error = %err, "invitation submit failed");
					view.set_status(format!("Failed to send invitations: {err}"));
				}
			},
		}
	}
	debug!(submits = sent.len(), "composer closed");
	Ok(sent)
}
