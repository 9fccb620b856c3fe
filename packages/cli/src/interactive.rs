//! Interactive menu for exploring the views.

use dialoguer::{Input, Select};
use mortality_dash_dashboard::{FilterEvent, RecomputationController, RecordingSink};

use crate::output::to_json;

enum Action {
    ChangeYears,
    SelectCountry,
    ShowViews,
    Quit,
}

impl Action {
    const ALL: &[Self] = &[
        Self::ChangeYears,
        Self::SelectCountry,
        Self::ShowViews,
        Self::Quit,
    ];

    const fn label(&self) -> &'static str {
        match self {
            Self::ChangeYears => "Change year range",
            Self::SelectCountry => "Select country",
            Self::ShowViews => "Show views",
            Self::Quit => "Quit",
        }
    }
}

/// Runs the menu loop until the user quits.
///
/// # Errors
///
/// Returns an error if a prompt fails or the views cannot be serialized.
pub fn run(
    controller: &mut RecomputationController,
    published: &RecordingSink,
) -> Result<(), Box<dyn std::error::Error>> {
    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        let idx = Select::new()
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::ChangeYears => change_years(controller)?,
            Action::SelectCountry => select_country(controller)?,
            Action::ShowViews => {
                if let Some(update) = published.updates().last() {
                    println!("{}", to_json(update, true)?);
                }
            }
            Action::Quit => return Ok(()),
        }
    }
}

fn change_years(
    controller: &mut RecomputationController,
) -> Result<(), Box<dyn std::error::Error>> {
    let (current_from, current_to) = controller
        .filter_state()
        .map_or((0, 0), |f| (f.year_range.from(), f.year_range.to()));

    let from: i32 = Input::new()
        .with_prompt("From year")
        .default(current_from)
        .interact_text()?;
    let to: i32 = Input::new()
        .with_prompt("To year")
        .default(current_to)
        .interact_text()?;

    if let Err(e) = controller.dispatch(FilterEvent::YearRangeChanged { from, to }) {
        println!("{e}");
    }

    Ok(())
}

fn select_country(
    controller: &mut RecomputationController,
) -> Result<(), Box<dyn std::error::Error>> {
    let countries: Vec<String> = controller
        .store()
        .map(|store| store.countries().into_iter().map(str::to_owned).collect())
        .unwrap_or_default();
    if countries.is_empty() {
        println!("No countries loaded");
        return Ok(());
    }

    let current = controller
        .filter_state()
        .and_then(|f| countries.iter().position(|c| *c == f.selected_country))
        .unwrap_or(0);

    let idx = Select::new()
        .with_prompt("Country")
        .items(&countries)
        .default(current)
        .max_length(20)
        .interact()?;

    controller.dispatch(FilterEvent::CountrySelected(countries[idx].clone()))?;

    Ok(())
}
