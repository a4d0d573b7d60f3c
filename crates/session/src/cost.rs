use crate::error::SessionError;
use crate::prompt::Prompter;
use analytics::{RecordLog, formulas};
use charts::{data, render_xy};
use configuration::ChartSettings;
use core_types::{CalculationKind, format_outcome};
use std::io::{BufRead, Write};

const MENU: &str = "\nEconomic Analysis Tool
1. Marginal Cost Calculation
2. Average Cost Calculation
3. Total Revenue Calculation
4. Break-even Analysis
5. Visualize Costs
6. Visualize Revenue
7. Generate Report
8. Exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CostMenuChoice {
    MarginalCost,
    AverageCost,
    TotalRevenue,
    BreakEven,
    VisualizeCosts,
    VisualizeRevenue,
    Report,
    Exit,
}

impl CostMenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::MarginalCost),
            "2" => Some(Self::AverageCost),
            "3" => Some(Self::TotalRevenue),
            "4" => Some(Self::BreakEven),
            "5" => Some(Self::VisualizeCosts),
            "6" => Some(Self::VisualizeRevenue),
            "7" => Some(Self::Report),
            "8" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// The cost/revenue calculator: menu loop, prompts, and the session's record log.
pub struct CostSession<R, W> {
    prompter: Prompter<R, W>,
    log: RecordLog,
    chart_size: ChartSettings,
}

impl<R: BufRead, W: Write> CostSession<R, W> {
    pub fn new(input: R, output: W, chart_size: ChartSettings) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            log: RecordLog::new(),
            chart_size,
        }
    }

    pub fn log(&self) -> &RecordLog {
        &self.log
    }

    /// Runs the menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<(), SessionError> {
        tracing::info!("Cost/revenue session started.");
        let result = match self.menu_loop() {
            Err(SessionError::InputClosed) => {
                tracing::info!("Input closed, ending cost/revenue session.");
                Ok(())
            }
            other => other,
        };
        tracing::info!(calculations = self.log.len(), "Cost/revenue session finished.");
        result
    }

    fn menu_loop(&mut self) -> Result<(), SessionError> {
        loop {
            self.prompter.say(MENU)?;
            let input = self.prompter.read_line("Enter your choice: ")?;

            match CostMenuChoice::parse(&input) {
                Some(CostMenuChoice::MarginalCost) => self.marginal_cost()?,
                Some(CostMenuChoice::AverageCost) => self.average_cost()?,
                Some(CostMenuChoice::TotalRevenue) => self.total_revenue()?,
                Some(CostMenuChoice::BreakEven) => self.break_even()?,
                Some(CostMenuChoice::VisualizeCosts) => {
                    let chart = data::cost_chart(&self.log);
                    self.show_chart(render_xy(&chart, self.chart_size))?
                }
                Some(CostMenuChoice::VisualizeRevenue) => {
                    let chart = data::revenue_chart(&self.log);
                    self.show_chart(render_xy(&chart, self.chart_size))?
                }
                Some(CostMenuChoice::Report) => self.report()?,
                Some(CostMenuChoice::Exit) => {
                    self.prompter.say("Exiting the application.")?;
                    return Ok(());
                }
                None => {
                    tracing::warn!(input = %input, "Invalid menu choice.");
                    self.prompter.say("Invalid choice, please try again.")?;
                }
            }
        }
    }

    fn marginal_cost(&mut self) -> Result<(), SessionError> {
        let p = &mut self.prompter;
        p.say("\nMarginal Cost Calculation")?;
        let previous_total_cost = p.decimal("Enter previous total cost: ", "Previous Total Cost")?;
        let current_total_cost = p.decimal("Enter current total cost: ", "Current Total Cost")?;
        let previous_quantity = p.decimal("Enter previous quantity produced: ", "Previous Quantity")?;
        let current_quantity = p.decimal("Enter current quantity produced: ", "Current Quantity")?;

        let outcome = formulas::marginal_cost(
            previous_total_cost,
            current_total_cost,
            previous_quantity,
            current_quantity,
        );
        p.say(format!("The marginal cost is: {}", format_outcome(&outcome)))?;

        self.log.record(
            CalculationKind::MarginalCost,
            vec![
                ("Previous Total Cost".to_string(), previous_total_cost),
                ("Current Total Cost".to_string(), current_total_cost),
                ("Previous Quantity".to_string(), previous_quantity),
                ("Current Quantity".to_string(), current_quantity),
            ],
            outcome,
        );
        Ok(())
    }

    fn average_cost(&mut self) -> Result<(), SessionError> {
        let p = &mut self.prompter;
        p.say("\nAverage Cost Calculation")?;
        let total_cost = p.decimal("Enter total cost: ", "Total Cost")?;
        let quantity = p.decimal("Enter quantity produced: ", "Quantity")?;

        let outcome = formulas::average_cost(total_cost, quantity);
        p.say(format!("The average cost is: {}", format_outcome(&outcome)))?;

        self.log.record(
            CalculationKind::AverageCost,
            vec![
                ("Total Cost".to_string(), total_cost),
                ("Quantity".to_string(), quantity),
            ],
            outcome,
        );
        Ok(())
    }

    fn total_revenue(&mut self) -> Result<(), SessionError> {
        let p = &mut self.prompter;
        p.say("\nTotal Revenue Calculation")?;
        let price = p.decimal("Enter price per unit: ", "Price Per Unit")?;
        let quantity = p.decimal("Enter quantity sold: ", "Quantity Sold")?;

        let outcome = Ok(formulas::total_revenue(price, quantity));
        p.say(format!("The total revenue is: {}", format_outcome(&outcome)))?;

        self.log.record(
            CalculationKind::TotalRevenue,
            vec![
                ("Price Per Unit".to_string(), price),
                ("Quantity Sold".to_string(), quantity),
            ],
            outcome,
        );
        Ok(())
    }

    fn break_even(&mut self) -> Result<(), SessionError> {
        let p = &mut self.prompter;
        p.say("\nBreak-even Analysis")?;
        let fixed_costs = p.decimal("Enter total fixed costs: ", "Fixed Costs")?;
        let price_per_unit = p.decimal("Enter price per unit: ", "Price Per Unit")?;
        let variable_cost_per_unit =
            p.decimal("Enter variable cost per unit: ", "Variable Cost Per Unit")?;

        let outcome = formulas::break_even_quantity(fixed_costs, price_per_unit, variable_cost_per_unit);
        match &outcome {
            Ok(_) => p.say(format!("The break-even quantity is: {} units.", format_outcome(&outcome)))?,
            Err(e) => p.say(format!("The break-even quantity is: {e}"))?,
        }

        self.log.record(
            CalculationKind::BreakEven,
            vec![
                ("Fixed Costs".to_string(), fixed_costs),
                ("Price Per Unit".to_string(), price_per_unit),
                ("Variable Cost Per Unit".to_string(), variable_cost_per_unit),
            ],
            outcome,
        );
        Ok(())
    }

    fn report(&mut self) -> Result<(), SessionError> {
        if self.log.is_empty() {
            return self.prompter.say("No calculations recorded yet.");
        }
        match self.log.summarize() {
            Ok(report) => self.prompter.say(report),
            Err(e) => {
                tracing::error!(error = %e, "Failed to build summary report.");
                self.prompter.say(e)
            }
        }
    }

    fn show_chart(&mut self, rendered: Result<String, charts::ChartError>) -> Result<(), SessionError> {
        match rendered {
            Ok(text) => self.prompter.say(text),
            Err(e) => self.prompter.say(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::FormulaError;
    use rust_decimal_macros::dec;

    fn run_script(script: &str) -> (String, RecordLog) {
        let mut out = Vec::new();
        let log = {
            let mut session = CostSession::new(script.as_bytes(), &mut out, ChartSettings::default());
            session.run().unwrap();
            session.log().clone()
        };
        (String::from_utf8(out).unwrap(), log)
    }

    #[test]
    fn calculations_are_printed_and_recorded() {
        let (out, log) = run_script(
            "1\n100\n150\n10\n20\n\
             2\n100\n0\n\
             3\n10\n5\n\
             4\n1000\n50\n30\n\
             8\n",
        );

        assert!(out.contains("The marginal cost is: 5"));
        assert!(out.contains("The average cost is: Error: Division by zero."));
        assert!(out.contains("The total revenue is: 50"));
        assert!(out.contains("The break-even quantity is: 50 units."));
        assert!(out.contains("Exiting the application."));

        assert_eq!(log.len(), 4);
        assert_eq!(log.records()[1].outcome(), &Err(FormulaError::DivisionByZero));
        assert_eq!(log.records()[3].inputs()[2], ("Variable Cost Per Unit".to_string(), dec!(30)));
    }

    #[test]
    fn invalid_numbers_are_reprompted_not_fatal() {
        let (out, log) = run_script("2\nlots\n100\n20\n8\n");
        assert!(out.contains("Invalid input. Please enter a numeric value for Total Cost."));
        assert_eq!(log.values_of(CalculationKind::AverageCost), vec![dec!(5)]);
    }

    #[test]
    fn failed_break_even_has_no_units_suffix() {
        let (out, _) = run_script("4\n1000\n30\n30\n8\n");
        assert!(out.contains("The break-even quantity is: Error: Division by zero.\n"));
    }

    #[test]
    fn invalid_choice_reprompts() {
        let (out, log) = run_script("9\nfoo\n8\n");
        assert_eq!(out.matches("Invalid choice, please try again.").count(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn report_summarizes_the_session() {
        let (out, _) = run_script(
            "1\n0\n5\n0\n1\n\
             1\n0\n7\n0\n1\n\
             2\n3\n1\n\
             7\n8\n",
        );
        assert!(out.contains("Marginal Cost"));
        assert!(out.contains("Average Cost"));
        assert!(out.contains("Average"));
    }

    #[test]
    fn report_on_empty_log_says_so() {
        let (out, _) = run_script("7\n8\n");
        assert!(out.contains("No calculations recorded yet."));
    }

    #[test]
    fn charts_without_data_print_a_message() {
        let (out, _) = run_script("5\n6\n8\n");
        assert!(out.contains("No data to plot for 'Cost Analysis Over Production'."));
        assert!(out.contains("No data to plot for 'Total Revenue and Break-even Analysis'."));
    }

    #[test]
    fn charts_render_recorded_results() {
        let (out, _) = run_script("3\n10\n5\n3\n12\n5\n4\n100\n10\n5\n6\n8\n");
        assert!(out.contains("Total Revenue and Break-even Analysis"));
        assert!(out.contains("Sales Instance"));
    }

    #[test]
    fn end_of_input_ends_the_session_cleanly() {
        let (out, log) = run_script("3\n10\n5\n");
        assert!(out.contains("The total revenue is: 50"));
        assert_eq!(log.len(), 1);
    }
}
