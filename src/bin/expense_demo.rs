use expense_core::{config::ConfigManager, errors::Result, init, Expense, ExpenseStore};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = ConfigManager::from_env().load()?;
    let mut store = ExpenseStore::new();

    let groceries = Expense::new("Groceries", 50.00);
    let groceries_id = groceries.id();
    store.add(groceries);

    println!("Expenses in the store:");
    println!("{}", store.render_with(&config));

    if let Some(expense) = store.find_by_id_mut(groceries_id) {
        expense.update(Some("Monthly Groceries".into()), Some(60.00));
        println!("\nUpdated Expense:");
        println!("{}", expense.render_with(&config));
    }

    println!("\nExpenses in the store after update:");
    println!("{}", store.render_with(&config));

    match store.find_by_id(groceries_id) {
        Some(found) => println!(
            "\nExpense found by ID {groceries_id}:\n{}",
            serde_json::to_string_pretty(&found.to_map()?)?
        ),
        None => println!("\nExpense with ID {groceries_id} not found."),
    }

    let title = "Monthly Groceries";
    let matches = store.find_by_title(title);
    if matches.is_empty() {
        println!("\nNo expenses found with title '{title}'.");
    } else {
        println!("\nExpenses found with title '{title}':");
        for expense in matches {
            println!("{}", serde_json::to_string_pretty(&expense.to_map()?)?);
        }
    }

    println!("\nStore export:");
    println!("{}", store.to_json_pretty()?);
    Ok(())
}

