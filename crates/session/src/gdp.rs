use crate::error::SessionError;
use crate::prompt::Prompter;
use analytics::RecordLog;
use charts::{ChartError, data, render_bars, render_xy};
use configuration::ChartSettings;
use core_types::{CalculationKind, GdpComponents, format_decimal};
use std::io::{BufRead, Write};
use storage::{GdpEntry, SeriesRepository, SeriesStore};

const MENU: &str = "\nGDP Calculator
1. Calculate GDP
2. Print lists
3. Save data
4. Load data
5. Plot GDP Trend
6. Plot Component Comparison
7. Plot Stacked Area Chart
8. Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GdpMenuChoice {
    Calculate,
    PrintLists,
    Save,
    Load,
    Trend,
    ComponentComparison,
    StackedArea,
    Quit,
}

impl GdpMenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Calculate),
            "2" => Some(Self::PrintLists),
            "3" => Some(Self::Save),
            "4" => Some(Self::Load),
            "5" => Some(Self::Trend),
            "6" => Some(Self::ComponentComparison),
            "7" => Some(Self::StackedArea),
            "8" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// The GDP tracker: named GDP lists, their JSON file, and the charts drawn from them.
pub struct GdpSession<R, W> {
    prompter: Prompter<R, W>,
    repository: SeriesRepository,
    store: SeriesStore,
    log: RecordLog,
    chart_size: ChartSettings,
}

impl<R: BufRead, W: Write> GdpSession<R, W> {
    /// Creates a session with the lists currently saved in the repository.
    pub fn open(
        input: R,
        output: W,
        repository: SeriesRepository,
        chart_size: ChartSettings,
    ) -> Result<Self, SessionError> {
        let store = repository.load()?;
        Ok(Self {
            prompter: Prompter::new(input, output),
            repository,
            store,
            log: RecordLog::new(),
            chart_size,
        })
    }

    pub fn store(&self) -> &SeriesStore {
        &self.store
    }

    pub fn log(&self) -> &RecordLog {
        &self.log
    }

    /// Runs the menu until the user quits or input ends.
    pub fn run(&mut self) -> Result<(), SessionError> {
        tracing::info!(path = ?self.repository.path(), lists = self.store.len(), "GDP session started.");
        let result = match self.menu_loop() {
            Err(SessionError::InputClosed) => {
                tracing::info!("Input closed, ending GDP session.");
                Ok(())
            }
            other => other,
        };
        tracing::info!(calculations = self.log.len(), "GDP session finished.");
        result
    }

    fn menu_loop(&mut self) -> Result<(), SessionError> {
        loop {
            self.prompter.say(MENU)?;
            let input = self.prompter.read_line("Enter the option (1-8): ")?;

            match GdpMenuChoice::parse(&input) {
                Some(GdpMenuChoice::Calculate) => self.calculate()?,
                Some(GdpMenuChoice::PrintLists) => self.print_lists()?,
                Some(GdpMenuChoice::Save) => self.save()?,
                Some(GdpMenuChoice::Load) => self.load()?,
                Some(GdpMenuChoice::Trend) => {
                    if let Some(name) = self.choose_list("GDP Trend")? {
                        let chart = data::gdp_trend(&name, self.entries(&name));
                        let rendered = render_xy(&chart, self.chart_size);
                        self.show_chart(rendered)?;
                    }
                }
                Some(GdpMenuChoice::ComponentComparison) => {
                    if let Some(name) = self.choose_list("Component Comparison")? {
                        let chart = data::component_comparison(&name, self.entries(&name));
                        let rendered = render_bars(&chart, self.chart_size);
                        self.show_chart(rendered)?;
                    }
                }
                Some(GdpMenuChoice::StackedArea) => {
                    if let Some(name) = self.choose_list("Stacked Area Chart")? {
                        let chart = data::stacked_area(&name, self.entries(&name));
                        let rendered = render_xy(&chart, self.chart_size);
                        self.show_chart(rendered)?;
                    }
                }
                Some(GdpMenuChoice::Quit) => return self.quit(),
                None => {
                    tracing::warn!(input = %input, "Invalid menu choice.");
                    self.prompter
                        .say("Invalid option. Please choose a valid option (1/2/3/4/5/6/7/8).")?;
                }
            }
        }
    }

    fn calculate(&mut self) -> Result<(), SessionError> {
        let p = &mut self.prompter;
        let year = p.text("Enter the year: ", "the year")?;
        let list_name = p.text("Enter a name for your list: ", "the list name")?;
        let components = GdpComponents::new(
            p.decimal("Enter Consumption: ", "Consumption")?,
            p.decimal("Enter Government Spending: ", "Government Spending")?,
            p.decimal("Enter Investments: ", "Investments")?,
            p.decimal("Enter Net Exports: ", "Net Exports")?,
        );

        let entry = self.store.add_entry(&list_name, &year, components);
        tracing::debug!(list = %list_name, year = %year, gdp = %entry.gdp(), "GDP calculated.");

        self.log.record(
            CalculationKind::Gdp,
            components
                .labelled()
                .iter()
                .map(|(label, value)| (label.to_string(), *value))
                .collect(),
            Ok(entry.gdp()),
        );

        self.prompter.say(format!("Calculated GDP: {}", format_decimal(entry.gdp())))?;
        self.prompter.say(format!(
            "List '{list_name}' updated with values for year {year}: {}",
            describe_values(&entry)
        ))?;

        let chart = data::component_shares(&list_name, entry.components());
        let rendered = render_bars(&chart, self.chart_size);
        self.show_chart(rendered)
    }

    fn print_lists(&mut self) -> Result<(), SessionError> {
        if self.store.is_empty() {
            return self.prompter.say("No lists found.");
        }

        let mut lines = vec!["\nLists created:".to_string()];
        for (name, entries) in self.store.iter() {
            lines.push(format!("List '{name}':"));
            for entry in entries {
                lines.push(format!("Year: {}, Values: {}", entry.year(), describe_values(entry)));
            }
        }
        self.prompter.say(lines.join("\n"))
    }

    fn save(&mut self) -> Result<(), SessionError> {
        match self.repository.save(&self.store) {
            Ok(()) => self.prompter.say("Data saved successfully."),
            Err(e) => {
                tracing::error!(error = %e, "Failed to save GDP data.");
                self.prompter.say(format!("Failed to save data: {e}"))
            }
        }
    }

    fn load(&mut self) -> Result<(), SessionError> {
        match self.repository.load() {
            Ok(store) => {
                self.store = store;
                self.prompter.say("Data loaded successfully.")
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load GDP data, keeping the current lists.");
                self.prompter.say(format!("Failed to load data: {e}"))
            }
        }
    }

    fn quit(&mut self) -> Result<(), SessionError> {
        self.prompter.say("Exiting the GDP Calculator.")?;
        if self.log.is_empty() {
            return Ok(());
        }
        match self.log.summarize() {
            Ok(report) => self.prompter.say(format!("GDP calculations this session:\n{report}")),
            Err(e) => self.prompter.say(e),
        }
    }

    /// Asks which list to plot. `None` when there is nothing to choose from.
    fn choose_list(&mut self, purpose: &str) -> Result<Option<String>, SessionError> {
        let names: Vec<String> = self.store.list_names().into_iter().map(String::from).collect();
        if names.is_empty() {
            self.prompter.say("No lists available. Calculate GDP first.")?;
            return Ok(None);
        }

        let options: Vec<&str> = names.iter().map(String::as_str).collect();
        let index = self
            .prompter
            .select(&format!("Lists available for {purpose} visualization:"), &options)?;
        Ok(Some(names[index].clone()))
    }

    fn entries(&self, list_name: &str) -> &[GdpEntry] {
        self.store.get(list_name).unwrap_or_default()
    }

    fn show_chart(&mut self, rendered: Result<String, ChartError>) -> Result<(), SessionError> {
        match rendered {
            Ok(text) => self.prompter.say(text),
            Err(e) => self.prompter.say(e),
        }
    }
}

fn describe_values(entry: &GdpEntry) -> String {
    let mut parts: Vec<String> = entry
        .components()
        .labelled()
        .iter()
        .map(|(label, value)| format!("{label}={}", format_decimal(*value)))
        .collect();
    parts.push(format!("GDP={}", format_decimal(entry.gdp())));
    parts.join(", ")
}
