//! Interactive session over stdin/stdout.
//!
//! Holds one catalog, one upload list and one draft for the lifetime of the
//! process. Nothing is written to disk; closing the session drops it all.

use std::io::{BufRead, IsTerminal, Write};

use clap::Args;
use rejection_core::rejection::RejectionRecord;
use rejection_core::{
    is_submittable, reset, update_field, CatalogStore, ChallengeRecord, Clock, Config, CoreError,
    Draft, DraftField, SystemClock, UploadStore,
};
use serde::Serialize;

const HELP: &str = "\
commands:
  list                    show challenges
  stats                   show completion progress
  toggle <id>             mark a challenge done / not done
  set <field> <value>     edit the draft (title, description, category, difficulty)
  draft                   show the draft
  reset                   clear the draft
  submit                  log the draft as a rejection
  new                     open the form again after a submit
  uploads                 show logged rejections, newest first
  delete <id>             remove a logged rejection
  categories              show suggested categories
  help                    show this text
  quit                    end the session";

#[derive(Args)]
pub struct SessionArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    List,
    Stats,
    Toggle(u32),
    Set { field: String, value: String },
    Draft,
    Reset,
    Submit,
    New,
    Uploads,
    Delete(String),
    Categories,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse a line. Blank lines and `#` comments give `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        // Trailing whitespace is kept so `set` can store it verbatim.
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        let (word, raw_rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = raw_rest.trim();

        let command = match word.to_ascii_lowercase().as_str() {
            "list" => SessionCommand::List,
            "stats" => SessionCommand::Stats,
            "toggle" => SessionCommand::Toggle(
                rest.parse()
                    .map_err(|_| format!("toggle expects a challenge id, got '{rest}'"))?,
            ),
            "set" => {
                // One separator character between field and value; the
                // value itself is taken as typed.
                let (field, value) = raw_rest
                    .trim_start()
                    .split_once(char::is_whitespace)
                    .unwrap_or((raw_rest.trim(), ""));
                if field.is_empty() {
                    return Err("set expects a field name".into());
                }
                SessionCommand::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            "draft" => SessionCommand::Draft,
            "reset" => SessionCommand::Reset,
            "submit" => SessionCommand::Submit,
            "new" => SessionCommand::New,
            "uploads" => SessionCommand::Uploads,
            "delete" => {
                if rest.is_empty() {
                    return Err("delete expects a rejection id".into());
                }
                SessionCommand::Delete(rest.to_string())
            }
            "categories" => SessionCommand::Categories,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" => SessionCommand::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(Some(command))
    }
}

#[derive(Serialize)]
struct DraftView<'a> {
    #[serde(flatten)]
    draft: &'a Draft,
    submittable: bool,
    form_open: bool,
}

/// State owned by one session.
pub struct Session<C: Clock = SystemClock> {
    catalog: CatalogStore,
    uploads: UploadStore<C>,
    draft: Draft,
    form_open: bool,
    config: Config,
    json: bool,
}

impl Session<SystemClock> {
    pub fn new(config: Config, json: bool) -> Self {
        Self::with_clock(config, json, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    pub fn with_clock(config: Config, json: bool, clock: C) -> Self {
        let uploads = UploadStore::with_clock(clock).with_policy(config.validation_policy());
        Self {
            catalog: CatalogStore::new(),
            uploads,
            draft: reset(),
            form_open: true,
            config,
            json,
        }
    }

    pub fn uploads(&self) -> &UploadStore<C> {
        &self.uploads
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Read commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, prompt: bool) -> Result<(), CoreError> {
        if prompt {
            writeln!(out, "Rejection Therapy. Type 'help' for commands.")?;
        }
        let mut lines = input.lines();
        loop {
            if prompt {
                write!(out, "> ")?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            match SessionCommand::parse(&line?) {
                Ok(Some(SessionCommand::Quit)) => break,
                Ok(Some(command)) => self.execute(command, out)?,
                Ok(None) => {}
                Err(message) => writeln!(out, "error: {message}")?,
            }
        }
        Ok(())
    }

    /// Apply one command and render the result.
    pub fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<(), CoreError> {
        match command {
            SessionCommand::List => self.render_catalog(out)?,
            SessionCommand::Stats => self.render_stats(out)?,
            SessionCommand::Toggle(id) => {
                if self.catalog.contains(id) {
                    self.catalog.toggle_completion(id);
                    self.render_stats(out)?;
                } else {
                    writeln!(out, "challenge not found: {id}")?;
                }
            }
            SessionCommand::Set { field, value } => {
                if !self.form_open {
                    writeln!(out, "form is closed; use 'new' to share another rejection")?;
                    return Ok(());
                }
                match DraftField::parse(&field, &value) {
                    Ok(update) => {
                        self.draft = update_field(&self.draft, update);
                        self.render_draft(out)?;
                    }
                    Err(e) => writeln!(out, "error: {e}")?,
                }
            }
            SessionCommand::Draft => self.render_draft(out)?,
            SessionCommand::Reset => {
                self.draft = reset();
                self.render_draft(out)?;
            }
            SessionCommand::Submit => {
                if !self.form_open {
                    writeln!(out, "form is closed; use 'new' to share another rejection")?;
                    return Ok(());
                }
                match self.uploads.submit(&self.draft) {
                    Ok(records) => {
                        let id = records[0].id.clone();
                        self.draft = reset();
                        self.form_open = false;
                        if self.json {
                            writeln!(out, "{}", serde_json::to_string_pretty(&self.uploads.records()[0])?)?;
                        } else {
                            writeln!(out, "submitted {id}")?;
                        }
                    }
                    Err(e) => writeln!(out, "cannot submit: {e}")?,
                }
            }
            SessionCommand::New => {
                self.form_open = true;
                self.render_draft(out)?;
            }
            SessionCommand::Uploads => self.render_uploads(out)?,
            SessionCommand::Delete(id) => {
                if self.uploads.get(&id).is_some() {
                    self.uploads.delete_by_id(&id);
                    writeln!(out, "deleted {id}")?;
                } else {
                    writeln!(out, "rejection not found: {id}")?;
                }
            }
            SessionCommand::Categories => {
                if self.json {
                    writeln!(out, "{}", serde_json::to_string(&self.config.categories.suggested)?)?;
                } else {
                    writeln!(out, "{}", self.config.categories.suggested.join(", "))?;
                }
            }
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => {}
        }
        Ok(())
    }

    fn render_catalog<W: Write>(&self, out: &mut W) -> Result<(), CoreError> {
        if self.json {
            writeln!(out, "{}", serde_json::to_string_pretty(self.catalog.records())?)?;
            return Ok(());
        }
        write_challenges(out, self.catalog.records())?;
        Ok(())
    }

    fn render_stats<W: Write>(&self, out: &mut W) -> Result<(), CoreError> {
        let stats = self.catalog.stats();
        if self.json {
            writeln!(out, "{}", serde_json::to_string(&stats)?)?;
        } else {
            writeln!(out, "Completed {}/{} ({}%)", stats.completed, stats.total, stats.percent)?;
        }
        Ok(())
    }

    fn render_draft<W: Write>(&self, out: &mut W) -> Result<(), CoreError> {
        let view = DraftView {
            draft: &self.draft,
            submittable: is_submittable(&self.draft, self.uploads.policy()),
            form_open: self.form_open,
        };
        if self.json {
            writeln!(out, "{}", serde_json::to_string(&view)?)?;
            return Ok(());
        }
        writeln!(out, "Title:       {}", self.draft.title)?;
        writeln!(out, "Description: {}", self.draft.description)?;
        writeln!(out, "Category:    {}", self.draft.category)?;
        writeln!(out, "Difficulty:  {}", self.draft.difficulty)?;
        writeln!(
            out,
            "{}",
            if view.submittable { "ready to submit" } else { "title, description and category are required" }
        )?;
        Ok(())
    }

    fn render_uploads<W: Write>(&self, out: &mut W) -> Result<(), CoreError> {
        if self.json {
            writeln!(out, "{}", serde_json::to_string_pretty(self.uploads.records())?)?;
            return Ok(());
        }
        if self.uploads.is_empty() {
            writeln!(out, "No rejections shared yet")?;
            writeln!(out, "Share your first rejection experience with 'set' and 'submit'")?;
            return Ok(());
        }
        writeln!(out, "Your Rejections")?;
        for record in self.uploads.records() {
            write_rejection(out, record, &self.config.display.date_format)?;
        }
        Ok(())
    }
}

/// Text rendering shared with the `catalog` command.
pub fn write_challenges<W: Write>(out: &mut W, records: &[ChallengeRecord]) -> std::io::Result<()> {
    for record in records {
        let mark = if record.completed { "x" } else { " " };
        writeln!(out, "[{mark}] {:>2}. {} ({})", record.id, record.title, record.difficulty)?;
        writeln!(out, "        {}", record.description)?;
    }
    Ok(())
}

fn write_rejection<W: Write>(out: &mut W, record: &RejectionRecord, date_format: &str) -> std::io::Result<()> {
    writeln!(out, "{}  {} ({})", record.id, record.title, record.difficulty)?;
    writeln!(out, "    {}", record.description)?;
    writeln!(out, "    {} · {}", record.category, record.display_date(date_format))
}

pub fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let json = args.json || config.display.json_output;
    let mut session = Session::new(config, json);

    let stdin = std::io::stdin();
    let prompt = stdin.is_terminal();
    let mut stdout = std::io::stdout().lock();
    session.run(stdin.lock(), &mut stdout, prompt)?;
    tracing::debug!(
        uploads = session.uploads().len(),
        completed = session.catalog().stats().completed,
        "session ended"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rejection_core::{Difficulty, FixedClock, ValidationPolicy};

    fn session() -> Session<FixedClock> {
        // 2024-03-05T12:00:00Z
        Session::with_clock(Config::default(), false, FixedClock(1_709_640_000_000))
    }

    fn drive(session: &mut Session<FixedClock>, script: &str) -> String {
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(SessionCommand::parse("  toggle 3 ").unwrap(), Some(SessionCommand::Toggle(3)));
        assert_eq!(
            SessionCommand::parse("set title Ask for a raise").unwrap(),
            Some(SessionCommand::Set {
                field: "title".into(),
                value: "Ask for a raise".into()
            })
        );
        assert_eq!(
            SessionCommand::parse("set category").unwrap(),
            Some(SessionCommand::Set {
                field: "category".into(),
                value: String::new()
            })
        );
        assert_eq!(SessionCommand::parse("# note").unwrap(), None);
        assert_eq!(SessionCommand::parse("").unwrap(), None);
        assert_eq!(SessionCommand::parse("EXIT").unwrap(), Some(SessionCommand::Quit));
    }

    #[test]
    fn parse_set_keeps_value_whitespace() {
        assert_eq!(
            SessionCommand::parse("set title    ").unwrap(),
            Some(SessionCommand::Set {
                field: "title".into(),
                value: "   ".into()
            })
        );
        assert_eq!(
            SessionCommand::parse("set category Work\r").unwrap(),
            Some(SessionCommand::Set {
                field: "category".into(),
                value: "Work".into()
            })
        );
    }

    #[test]
    fn parse_errors() {
        assert!(SessionCommand::parse("toggle three").is_err());
        assert!(SessionCommand::parse("delete").is_err());
        assert!(SessionCommand::parse("set").is_err());
        assert!(SessionCommand::parse("dance").is_err());
    }

    #[test]
    fn toggle_and_stats() {
        let mut s = session();
        let out = drive(&mut s, "toggle 3\nstats\ntoggle 3\n");
        assert_eq!(out, "Completed 1/10 (10%)\nCompleted 1/10 (10%)\nCompleted 0/10 (0%)\n");
    }

    #[test]
    fn toggle_unknown_reports_not_found() {
        let mut s = session();
        let out = drive(&mut s, "toggle 11\n");
        assert_eq!(out, "challenge not found: 11\n");
        assert_eq!(s.catalog().stats().completed, 0);
    }

    #[test]
    fn submit_flow_resets_and_closes_form() {
        let mut s = session();
        let out = drive(
            &mut s,
            "set title Ask for discount\nset description desc\nset category Work\nset difficulty easy\nsubmit\n",
        );
        assert!(out.contains("ready to submit"));
        assert!(out.ends_with("submitted 1709640000000-0\n"));
        assert_eq!(s.uploads().len(), 1);
        assert_eq!(s.uploads().records()[0].difficulty, Difficulty::Easy);
        assert_eq!(s.draft(), &reset());

        let out = drive(&mut s, "set title again\nsubmit\n");
        assert_eq!(
            out,
            "form is closed; use 'new' to share another rejection\n\
             form is closed; use 'new' to share another rejection\n"
        );
    }

    #[test]
    fn invalid_submit_keeps_draft() {
        let mut s = session();
        let out = drive(&mut s, "set description x\nset category y\nsubmit\n");
        assert!(out.ends_with("cannot submit: 'title' is required\n"));
        assert!(s.uploads().is_empty());
        assert_eq!(s.draft().category, "y");
    }

    #[test]
    fn uploads_empty_then_populated_then_deleted() {
        let mut s = session();
        let out = drive(&mut s, "uploads\n");
        assert!(out.starts_with("No rejections shared yet"));

        drive(&mut s, "set title A\nset description d\nset category Social\nsubmit\n");
        let out = drive(&mut s, "uploads\n");
        assert!(out.contains("Your Rejections"));
        assert!(out.contains("1709640000000-0  A (Medium)"));
        assert!(out.contains("Social · Mar 5, 2024"));

        let out = drive(&mut s, "delete 1709640000000-0\ndelete 1709640000000-0\n");
        assert_eq!(out, "deleted 1709640000000-0\nrejection not found: 1709640000000-0\n");
        assert!(s.uploads().is_empty());
    }

    #[test]
    fn bad_field_and_difficulty_are_reported() {
        let mut s = session();
        let out = drive(&mut s, "set mood sad\nset difficulty brutal\n");
        assert!(out.contains("Unknown field 'mood'"));
        assert!(out.contains("Invalid difficulty 'brutal'"));
        assert_eq!(s.draft(), &reset());
    }

    #[test]
    fn quit_stops_reading() {
        let mut s = session();
        let out = drive(&mut s, "quit\ntoggle 1\n");
        assert!(out.is_empty());
        assert_eq!(s.catalog().stats().completed, 0);
    }

    #[test]
    fn json_stats() {
        let mut s = Session::with_clock(Config::default(), true, FixedClock(0));
        let out = drive(&mut s, "toggle 1\n");
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["completed"], 1);
        assert_eq!(value["percent"], 10);
    }

    #[test]
    fn exact_policy_from_config() {
        let mut config = Config::default();
        config.set("validation.trim_whitespace", "false").unwrap();
        let s = Session::with_clock(config, false, FixedClock(0));
        assert_eq!(s.uploads().policy(), ValidationPolicy::Exact);
    }

    #[test]
    fn exact_policy_accepts_whitespace_title() {
        let mut config = Config::default();
        config.set("validation.trim_whitespace", "false").unwrap();
        let mut s = Session::with_clock(config, false, FixedClock(0));
        let out = drive(&mut s, "set title   \nset description d\nset category c\nsubmit\n");
        assert!(out.ends_with("submitted 0-0\n"));
        assert_eq!(s.uploads().records()[0].title, "  ");

        let mut trimmed = session();
        let out = drive(&mut trimmed, "set title   \nset description d\nset category c\nsubmit\n");
        assert!(out.ends_with("cannot submit: 'title' is required\n"));
    }

    #[test]
    fn uploads_use_configured_date_format() {
        let mut config = Config::default();
        config.set("display.date_format", "%Y-%m-%d").unwrap();
        let mut s = Session::with_clock(config, false, FixedClock(1_709_640_000_000));
        let out = drive(&mut s, "set title a\nset description b\nset category c\nsubmit\nuploads\n");
        assert!(out.contains("c · 2024-03-05"));
    }

    #[test]
    fn uploads_render_with_malformed_date_format() {
        let mut config = Config::default();
        config.display.date_format = "%Q".into();
        let mut s = Session::with_clock(config, false, FixedClock(1_709_640_000_000));
        let out = drive(&mut s, "set title a\nset description b\nset category c\nsubmit\nuploads\n");
        assert!(out.contains("c · Mar 5, 2024"));
    }

    #[test]
    fn categories_from_config() {
        let mut config = Config::default();
        config.set("categories.suggested", "Dating,Sales").unwrap();
        let mut s = Session::with_clock(config, false, FixedClock(0));
        assert_eq!(drive(&mut s, "categories\n"), "Dating, Sales\n");
    }
}
