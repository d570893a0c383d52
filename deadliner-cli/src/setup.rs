use anyhow::{Context, Result};
use deadliner_core::{Deadliner, Profile, Repository, StudyStyle, TimeOfDay};
use std::io::{self, BufRead, Write};

/// Ask one profile question, showing the current value in brackets.
/// `None` means the answer was blank and the current value stays.
fn ask(
    input: &mut impl BufRead,
    out: &mut impl Write,
    label: &str,
    current: &str,
) -> Result<Option<String>> {
    write!(out, "{label} [{current}]: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("reading answer")?;
    let answer = line.trim();
    Ok((!answer.is_empty()).then(|| answer.to_string()))
}

/// Interactive profile capture on the terminal.
pub fn run_setup<R: Repository>(engine: &mut Deadliner<R>) -> Result<()> {
    let stdin = io::stdin();
    run_setup_with(engine, &mut stdin.lock(), &mut io::stdout())
}

fn run_setup_with<R: Repository>(
    engine: &mut Deadliner<R>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "Deadliner setup (blank keeps the value in brackets)\n")?;
    let current = engine.profile().clone();

    let answers = Answers {
        hours: ask(
            input,
            out,
            "Daily study hours",
            &current.daily_study_hours.to_string(),
        )?,
        times: ask(
            input,
            out,
            "Preferred study times (morning/afternoon/evening/night)",
            &join_lower(&current.preferred_times),
        )?,
        subjects: ask(input, out, "Subjects", &current.subjects.join(", "))?,
        style: ask(
            input,
            out,
            "Study style (focused/distributed)",
            &join_lower(&[current.study_style]),
        )?,
    };

    let profile = answers.apply(current)?;
    engine.update_profile(profile).context("saving profile")?;

    let p = engine.profile();
    writeln!(out, "\nSaved profile:")?;
    writeln!(out, "- daily study hours: {}", p.daily_study_hours)?;
    writeln!(out, "- preferred times:   {}", join_lower(&p.preferred_times))?;
    writeln!(out, "- subjects:          {}", p.subjects.join(", "))?;
    writeln!(out, "- study style:       {}", join_lower(&[p.study_style]))?;

    writeln!(out, "\nNext: deadliner add --title Midterm --subject Math --kind exam \\")?;
    writeln!(out, "        --due 2026-11-02 --hours 6")?;
    Ok(())
}

fn join_lower<T: std::fmt::Debug>(items: &[T]) -> String {
    items
        .iter()
        .map(|t| format!("{t:?}").to_lowercase())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw setup answers; `None` keeps the profile's value.
#[derive(Debug, Default)]
struct Answers {
    hours: Option<String>,
    times: Option<String>,
    subjects: Option<String>,
    style: Option<String>,
}

impl Answers {
    fn apply(self, mut profile: Profile) -> Result<Profile> {
        if let Some(h) = self.hours {
            profile.daily_study_hours = h
                .parse::<f64>()
                .with_context(|| format!("invalid hours: {h}"))?;
        }
        if let Some(t) = self.times {
            profile.preferred_times = t
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(|s| s.parse::<TimeOfDay>().map_err(anyhow::Error::msg))
                .collect::<Result<Vec<_>>>()?;
        }
        if let Some(s) = self.subjects {
            profile.subjects = s
                .split(',')
                .map(|x| x.trim().to_string())
                .filter(|x| !x.is_empty())
                .collect();
        }
        if let Some(s) = self.style {
            profile.study_style = s.parse::<StudyStyle>().map_err(anyhow::Error::msg)?;
        }
        Ok(profile)
    }
}
