//! CLI module for the dday application
//!
//! This module turns parsed subcommands into calls on the event store and
//! prints the results.
use std::{
    io::{stdin, stdout},
    path::PathBuf,
};

use console::{style, StyledObject};
use log::{debug, info};

use crate::{
    confirm, edit_memo_in_editor, format_offset, long_date, parse_color, parse_date,
    parse_date_or, validate_title, CardView, Category, Clock, Commands, Config, DateStatus,
    DdayError, Event, EventDraft, EventPatch, EventStore, HomeView, Labels, Persistence, Result,
    COLORS,
};

/// CLI Application handler - processes CLI commands against an EventStore
pub struct App<P: Persistence, C: Clock> {
    store: EventStore<P, C>,

    /// Effective configuration (file plus command-line overrides)
    config: Config,

    /// Where `config --set/--reset` writes
    config_path: PathBuf,

    verbose: bool,
}

impl<P: Persistence, C: Clock> App<P, C> {
    pub fn new(store: EventStore<P, C>, config: Config, config_path: PathBuf, verbose: bool) -> Self {
        Self {
            store,
            config,
            config_path,
            verbose,
        }
    }

    pub fn store(&self) -> &EventStore<P, C> {
        &self.store
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::List { past, json } => self.list_events(past, json),

            Commands::Add {
                title,
                date,
                category,
                color,
                repeat,
                memo,
                edit_memo,
            } => self.add_event(title, date, category, color, repeat, memo, edit_memo),

            Commands::View { id, json } => self.view_event(&id, json),

            Commands::Edit {
                id,
                title,
                date,
                category,
                color,
                repeat,
                memo,
                edit_memo,
            } => {
                let patch = self.build_patch(&id, title, date, category, color, repeat, memo, edit_memo)?;
                self.edit_event(&id, patch)
            }

            Commands::Delete { id, force } => self.delete_event(&id, force),

            Commands::Palette => {
                self.show_palette();
                Ok(())
            }

            Commands::Config { show, set, reset } => self.handle_config(show, set, reset),
        }
    }

    fn list_events(&self, past: bool, json: bool) -> Result<()> {
        if json {
            return self.list_events_json();
        }

        let labels = Labels::for_locale(self.config.locale);
        let view = HomeView::build(&self.store, self.config.locale, past || self.config.show_past);
        let width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80)
            .min(50);

        if let Some(featured) = &view.featured {
            println!("{}", style(labels.nearest).dim());
            println!(
                "{}  {}",
                style(&featured.marker).bold().blue(),
                style(&featured.title).bold()
            );
            println!("{}", style(&featured.long_date).dim());
            println!("{}", "=".repeat(width));
        }

        println!(
            "{}",
            style(format!("{} ({})", labels.upcoming, view.upcoming.len())).bold()
        );
        if view.upcoming.is_empty() {
            println!("  {}", labels.empty);
            println!("  {}", style(labels.empty_hint).dim());
        } else {
            for card in &view.upcoming {
                self.print_card(card, &labels);
            }
        }

        if !view.past.is_empty() {
            println!("{}", "-".repeat(width));
            let toggle = if view.past_expanded { "▲" } else { "▼ (--past)" };
            println!(
                "{} {}",
                style(format!("{} ({})", labels.past, view.past.len())).bold(),
                style(toggle).dim()
            );
            if view.past_expanded {
                for card in &view.past {
                    self.print_card(card, &labels);
                }
            }
        }

        Ok(())
    }

    fn list_events_json(&self) -> Result<()> {
        let rows: Vec<serde_json::Value> = self
            .store
            .sorted()
            .into_iter()
            .map(|event| {
                let offset = self.store.offset_of(event);
                serde_json::json!({
                    "event": event,
                    "offset": offset,
                    "dday": format_offset(offset),
                })
            })
            .collect();

        println!("{}", serde_json::to_string_pretty(&rows)?);
        Ok(())
    }

    fn print_card(&self, card: &CardView, labels: &Labels) {
        let marker = marker_style(&card.marker, card.status);
        let repeat = if card.repeat {
            format!(" 🔄 {}", labels.repeat)
        } else {
            String::new()
        };
        let today = if card.status == DateStatus::Today {
            format!(" {}", style(labels.today).red())
        } else {
            String::new()
        };

        println!(
            "  {} {}{}  {}  {}{}",
            card.icon,
            style(&card.title).bold(),
            repeat,
            style(&card.short_date).dim(),
            marker,
            today
        );
        if self.verbose {
            println!("     id: {}  colour: {}", card.id, card.color);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn add_event(
        &mut self,
        title: String,
        date: Option<String>,
        category: Category,
        color: Option<String>,
        repeat: bool,
        memo: Option<String>,
        edit_memo: bool,
    ) -> Result<()> {
        let title = validate_title(&title)?;
        let date = parse_date_or(date.as_deref(), self.store.clock().today())?;
        let color = match color {
            Some(c) => parse_color(&c)?,
            None => COLORS[0].to_string(),
        };

        let mut memo = memo.map(|m| m.trim().to_string()).unwrap_or_default();
        if edit_memo {
            memo = edit_memo_in_editor(&self.config.get_editor_command(), &title, &memo)?;
        }

        let id = self.store.add(EventDraft {
            title,
            date,
            category,
            color,
            is_repeat: repeat,
            memo,
        });

        if let Some(event) = self.store.get(&id) {
            let offset = self.store.offset_of(event);
            println!(
                "Event created with ID: {} ({})",
                id,
                marker_style(&format_offset(offset), DateStatus::from_offset(offset))
            );
        }
        Ok(())
    }

    fn view_event(&self, id: &str, json: bool) -> Result<()> {
        let event = self.find(id)?;

        if json {
            println!("{}", serde_json::to_string_pretty(event)?);
            return Ok(());
        }

        let locale = self.config.locale;
        let offset = self.store.offset_of(event);
        println!("{} {}", event.category.icon(), style(&event.title).bold());
        println!(
            "{}",
            marker_style(&format_offset(offset), DateStatus::from_offset(offset))
        );
        println!("Date:     {}", long_date(event.date, locale));
        println!("Category: {}", event.category.label(locale));
        println!("Colour:   {}", event.color);
        println!("Repeats:  {}", if event.is_repeat { "yes" } else { "no" });
        println!("Created:  {}", event.created_at.format("%Y-%m-%d %H:%M"));
        println!("ID:       {}", event.id);
        if !event.memo.is_empty() {
            println!("\n{}", event.memo);
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn build_patch(
        &self,
        id: &str,
        title: Option<String>,
        date: Option<String>,
        category: Option<Category>,
        color: Option<String>,
        repeat: Option<bool>,
        memo: Option<String>,
        edit_memo: bool,
    ) -> Result<EventPatch> {
        if memo.is_some() && edit_memo {
            return Err(DdayError::InvalidInput {
                message: "Cannot specify both --memo and --edit-memo".to_string(),
            });
        }

        let mut patch = EventPatch {
            title: title.as_deref().map(validate_title).transpose()?,
            date: date.as_deref().map(parse_date).transpose()?,
            category,
            color: color.as_deref().map(parse_color).transpose()?,
            is_repeat: repeat,
            memo: memo.map(|m| m.trim().to_string()),
        };

        if edit_memo {
            let event = self.find(id)?;
            patch.memo = Some(edit_memo_in_editor(
                &self.config.get_editor_command(),
                &event.title,
                &event.memo,
            )?);
        }

        Ok(patch)
    }

    fn edit_event(&mut self, id: &str, patch: EventPatch) -> Result<()> {
        if patch.is_empty() {
            println!("Nothing to change for event {}", id);
            return Ok(());
        }

        self.store.update(id, patch)?;
        println!("Event {} updated successfully", id);
        Ok(())
    }

    fn delete_event(&mut self, id: &str, force: bool) -> Result<()> {
        let event = self.find(id)?.clone();

        if !force {
            let offset = self.store.offset_of(&event);
            println!("You are about to delete the following event:");
            println!("ID:     {}", event.id);
            println!("Title:  {}", event.title);
            println!(
                "Date:   {} ({})",
                long_date(event.date, self.config.locale),
                format_offset(offset)
            );
            println!("\nThis action cannot be undone!");

            let prompt = format!("Delete \"{}\"?", event.title);
            if !confirm(&prompt, stdin().lock(), stdout())? {
                println!("Deletion cancelled.");
                return Ok(());
            }
        }

        self.store.delete(id);
        println!(
            "Event '{}' ({}) has been permanently deleted.",
            event.title, event.id
        );
        Ok(())
    }

    fn show_palette(&self) {
        println!("{}", style("Categories").bold());
        for category in Category::ALL {
            println!(
                "  {} {:<12} {}",
                category.icon(),
                category.key(),
                category.label(self.config.locale)
            );
        }

        println!("{}", style("Colours").bold());
        for (i, color) in COLORS.iter().enumerate() {
            println!("  {}  {}", i + 1, color);
        }
    }

    fn handle_config(&self, show: bool, set: Option<String>, reset: bool) -> Result<()> {
        if reset {
            Config::default().save(&self.config_path)?;
            println!("Configuration reset to defaults");
            return Ok(());
        }

        if let Some(assignment) = set {
            let mut file_config = Config::load(&self.config_path)?;
            file_config.set(&assignment)?;
            file_config.save(&self.config_path)?;
            info!("Updated setting: {}", assignment);
            println!("Updated {}", assignment);
            return Ok(());
        }

        if !show {
            debug!("No config action given, showing current configuration");
        }
        println!("Config file: {}", self.config_path.display());
        println!("{}", serde_json::to_string_pretty(&self.config)?);
        Ok(())
    }

    fn find(&self, id: &str) -> Result<&Event> {
        self.store.get(id).ok_or_else(|| DdayError::EventNotFound { id: id.to_string() })
    }
}

fn marker_style(marker: &str, status: DateStatus) -> StyledObject<&str> {
    match status {
        DateStatus::Today => style(marker).bold().red(),
        DateStatus::Past => style(marker).dim(),
        DateStatus::Future => style(marker).bold().blue(),
    }
}
