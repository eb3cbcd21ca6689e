//! Session subcommand handlers.

use std::fmt::Write as _;

use rickdex_core::{EntityKind, Screen, SessionContext};

use crate::cli::{GlobalOpts, SessionArgs, SessionCommand};
use crate::config;
use crate::error::CliError;
use crate::output;

fn screen_label(screen: Screen) -> String {
    match screen {
        Screen::List { kind } => format!("{} list", kind.plural()),
        Screen::Detail { kind, id } => format!("{kind} #{id}"),
    }
}

fn summary(session: &SessionContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "screen = {}", screen_label(session.screen));
    let _ = writeln!(out, "theme  = {}", session.theme);
    for kind in [EntityKind::Character, EntityKind::Episode, EntityKind::Location] {
        let view = session.view(kind);
        let filters: Vec<String> = view
            .filters()
            .active()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        let filters = if filters.is_empty() {
            "(no filters)".to_owned()
        } else {
            filters.join(" ")
        };
        let _ = writeln!(
            out,
            "\n[{}]\npage    = {} of {}\nfilters = {filters}",
            kind.plural(),
            view.page(),
            view.pager().total_pages()
        );
    }
    out.trim_end().to_owned()
}

pub fn handle(args: SessionArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SessionCommand::Show => {
            let session = config::load_session()?;
            let out = output::render_single(global.output_format(), &session, summary, |s| {
                screen_label(s.screen)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SessionCommand::Reset => {
            let removed = config::clear_session_at(&config::session_path())?;
            if removed {
                output::notice("Session reset", global.quiet);
            } else {
                output::notice("No saved session", global.quiet);
            }
            Ok(())
        }

        SessionCommand::Path => {
            output::print_output(&config::session_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_every_view() {
        let mut session = SessionContext::default();
        session
            .view_mut(EntityKind::Character)
            .set_filter("status", "alive")
            .unwrap();
        session.open_detail(EntityKind::Character, 1);

        let text = summary(&session);
        assert!(text.starts_with("screen = character #1\ntheme  = dark"));
        assert!(text.contains("[characters]\npage    = 1 of 1\nfilters = status=alive"));
        assert!(text.contains("[locations]\npage    = 1 of 1\nfilters = (no filters)"));
    }
}
