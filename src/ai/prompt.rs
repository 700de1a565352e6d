//! Prompt text sent to the chat-completions API

use std::fmt::Write;

use super::provider::{BudgetSuggestionRequest, SpendingSummaryRequest};

pub const BUDGET_ADVISOR_SYSTEM: &str = "You are a personal finance advisor. \
Answer with a single JSON object and nothing else.";

pub const SPENDING_ANALYST_SYSTEM: &str = "You are a financial advisor AI. \
Answer with a single JSON object and nothing else.";

/// User prompt asking for one suggested budget per spending category
pub fn budget_suggestion_prompt(request: &BudgetSuggestionRequest) -> String {
    let mut prompt = String::from(
        "Analyze the user's income, total budget, and spending habits to provide \
         budget suggestions for each category.\n\n\
         Keep the total spending BELOW the specified budget ceiling, but attempt to \
         allocate all of the budget.\n\n",
    );

    let _ = writeln!(prompt, "Income: {:.2}", request.income);
    let _ = writeln!(prompt, "Total Budget: {:.2}", request.total_budget);
    prompt.push_str("Spending Habits:\n");
    for (category, spent) in &request.spending_habits {
        let _ = writeln!(prompt, "{}: {:.2}", category, spent);
    }

    prompt.push_str(
        "\nProvide budget suggestions for each category, optimizing based on spending \
         habits while ensuring the total budget is not exceeded. The output must be a \
         JSON object where each key is the category and the value is the suggested \
         budget for that category as a number. Make sure all category keys from \
         spending habits are present.",
    );
    prompt
}

/// User prompt asking for a short spending summary
pub fn spending_summary_prompt(request: &SpendingSummaryRequest) -> String {
    let mut prompt = String::from(
        "Provide a concise and helpful summary of the user's spending habits. \
         Analyze the provided income, expenses, and budget data.\n\n\
         - Identify the top spending categories.\n\
         - Compare spending against the budget for key categories.\n\
         - Offer one or two actionable insights or suggestions for improvement.\n\
         - Keep the summary to 2-3 sentences.\n\n",
    );

    let _ = writeln!(prompt, "Income: {:.2}", request.income);
    prompt.push_str("Expenses:\n");
    for expense in &request.expenses {
        let _ = writeln!(
            prompt,
            "- Category: {}, Amount: {:.2}, Date: {}",
            expense.category, expense.amount, expense.date
        );
    }
    prompt.push_str("\nBudgets:\n");
    for budget in &request.budgets {
        let _ = writeln!(
            prompt,
            "- Category: {}, Budget: {:.2}",
            budget.category, budget.amount
        );
    }

    prompt.push_str(
        "\nRespond with a JSON object with a string field \"summary\" and a string \
         field \"visualizationData\" (placeholder data for a chart).",
    );
    prompt
}
