use crate::cli::commands::required_time;
use crate::cli::parser::{Commands, ProfileArgs, StudentAction};
use crate::config::Config;
use crate::core::tracker::Tracker;
use crate::errors::AppResult;
use crate::models::{Student, StudentDraft};
use crate::ui::messages::{confirm, info, success};
use crate::utils::formatting::{dash_if_empty, hours, plain_number};
use crate::utils::parse_amount;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_time, hours_between};

fn draft_from(args: &ProfileArgs) -> AppResult<StudentDraft> {
    Ok(StudentDraft {
        name: args.name.trim().to_string(),
        grade: args
            .grade
            .as_ref()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty()),
        course: args.course.trim().to_string(),
        start_time: required_time(&args.start)?,
        end_time: required_time(&args.end)?,
        rate: parse_amount(&args.rate)?,
    })
}

fn print_students(students: &[Student]) {
    if students.is_empty() {
        println!("No students yet.");
        return;
    }

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Name"),
        Column::left("Grade"),
        Column::left("Course"),
        Column::left("Time"),
        Column::right("Hours"),
        Column::right("Rate"),
    ]);
    for s in students {
        table.add_row(vec![
            s.id.to_string(),
            s.name.clone(),
            dash_if_empty(s.grade.as_deref().unwrap_or("")),
            s.course.clone(),
            format!("{}-{}", format_time(s.start_time), format_time(s.end_time)),
            hours(hours_between(s.start_time, s.end_time)),
            plain_number(s.rate),
        ]);
    }
    print!("{}", table.render());
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Student { action } = cmd {
        let mut tracker = Tracker::open(cfg)?;

        match action {
            StudentAction::Add(args) => {
                let s = tracker.add_student(draft_from(args)?)?;
                success(format!("Student #{} added: {}", s.id, s.name));
            }
            StudentAction::Update { id, fields } => {
                match tracker.update_student(*id, draft_from(fields)?)? {
                    Some(s) => success(format!("Student #{} updated: {}", s.id, s.name)),
                    None => info(format!("No student with ID {}.", id)),
                }
            }
            StudentAction::Del { id, yes } => {
                let Some(name) = tracker.state().student(*id).map(|s| s.name.clone()) else {
                    info(format!("No student with ID {}.", id));
                    return Ok(());
                };
                if !*yes && !confirm(format!("Delete student #{} ({})?", id, name)) {
                    info("Nothing deleted.");
                    return Ok(());
                }
                if tracker.delete_student(*id)? {
                    success(format!("Student #{} deleted; logged sessions are kept.", id));
                }
            }
            StudentAction::List => print_students(&tracker.state().students),
        }

        tracker.finish()?;
    }
    Ok(())
}
