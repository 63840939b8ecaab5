use crate::cli::commands::required_time;
use crate::cli::parser::{ClassAction, ClassArgs, Commands};
use crate::config::Config;
use crate::core::tracker::Tracker;
use crate::errors::AppResult;
use crate::models::{ClassDraft, ClassGroup};
use crate::ui::messages::{confirm, info, success};
use crate::utils::formatting::{dash_if_empty, hours, plain_number};
use crate::utils::parse_amount;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_time, hours_between};

fn draft_from(args: &ClassArgs) -> AppResult<ClassDraft> {
    let p = &args.profile;
    Ok(ClassDraft {
        name: p.name.trim().to_string(),
        grade: p
            .grade
            .as_ref()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty()),
        course_name: p.course.trim().to_string(),
        start_time: required_time(&p.start)?,
        end_time: required_time(&p.end)?,
        size: args.size,
        rate: parse_amount(&p.rate)?,
    })
}

fn print_classes(classes: &[ClassGroup]) {
    if classes.is_empty() {
        println!("No classes yet.");
        return;
    }

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Name"),
        Column::left("Grade"),
        Column::left("Course"),
        Column::left("Time"),
        Column::right("Size"),
        Column::right("Hours"),
        Column::right("Rate"),
    ]);
    for c in classes {
        table.add_row(vec![
            c.id.to_string(),
            c.name.clone(),
            dash_if_empty(c.grade.as_deref().unwrap_or("")),
            c.course_name.clone(),
            format!("{}-{}", format_time(c.start_time), format_time(c.end_time)),
            c.size.to_string(),
            hours(hours_between(c.start_time, c.end_time)),
            plain_number(c.rate),
        ]);
    }
    print!("{}", table.render());
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Class { action } = cmd {
        let mut tracker = Tracker::open(cfg)?;

        match action {
            ClassAction::Add(args) => {
                let c = tracker.add_class(draft_from(args)?)?;
                success(format!("Class #{} added: {} ({} people)", c.id, c.name, c.size));
            }
            ClassAction::Update { id, fields } => {
                match tracker.update_class(*id, draft_from(fields)?)? {
                    Some(c) => success(format!("Class #{} updated: {}", c.id, c.name)),
                    None => info(format!("No class with ID {}.", id)),
                }
            }
            ClassAction::Del { id, yes } => {
                let Some(name) = tracker.state().class(*id).map(|c| c.name.clone()) else {
                    info(format!("No class with ID {}.", id));
                    return Ok(());
                };
                if !*yes && !confirm(format!("Delete class #{} ({})?", id, name)) {
                    info("Nothing deleted.");
                    return Ok(());
                }
                if tracker.delete_class(*id)? {
                    success(format!("Class #{} deleted; logged sessions are kept.", id));
                }
            }
            ClassAction::List => print_classes(&tracker.state().classes),
        }

        tracker.finish()?;
    }
    Ok(())
}
