// ============================================================================
// Basic Usage Example
// ============================================================================

use profit_split::codec::legacy;
use profit_split::prelude::*;
use std::sync::Arc;

fn print_result(calc: &Calculator) {
    let result = calc.result();
    if result.valid {
        println!("  Total profit: {}", result.total.to_grouped_string(2));
        println!("  Major holder: {}", result.major.to_grouped_string(2));
        println!("  Minor holder: {}", result.minor.to_grouped_string(2));
    } else {
        println!("  Invalid input: check A <= B, holdings positive and D > 0");
    }

    let status = calc.holdings_status();
    if let Some(message) = &status.message {
        println!("  Holdings: {}", message);
    }
}

fn main() {
    println!("=== Profit Split Example ===\n");

    let mut calc = Calculator::new(CalculatorConfig::default(), Arc::new(LoggingEventHandler))
        .expect("default config is valid");

    println!("Sample inputs (A=10,000,000 B=50,000,000 C=40,000,000 D=130, 60 shares):");
    print_result(&calc);

    println!("\nMinor holder takes 56 of the 60 shares:");
    calc.set_field(StateField::MinorShares, "56");
    print_result(&calc);

    println!("\nNet profit turns negative:");
    calc.set_field(StateField::NetProfit, "-8,000,000");
    print_result(&calc);

    let token = calc.share_token();
    println!("\n=== Share Link ===");
    println!("  Token:  #{}", token);
    println!("  Legacy: ?{}", legacy::encode_query(&calc.state()));

    let restored = Calculator::from_link(
        Some(&format!("#{}", token)),
        None,
        CalculatorConfig::default(),
        Arc::new(NoOpEventHandler),
    )
    .expect("default config is valid");

    println!("\nRestored from token:");
    print_result(&restored);
    assert_eq!(restored.result(), calc.result());
}
