use std::io::{self, Write};

use crate::Balancer::balance_api::{ChemEqBalancer, compute};

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => balance_menu(),
            "2" => system_menu(),
            "3" => json_menu(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options (1, 2, 3, 0)

Cyan (\x1b[36m) - "Enter your choice:" prompt

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Wellcome to StoiThe: balancer of chemical equations written in the\n
    compact bracket notation, e.g. [H*2]+[O*2]⇒[H*2 O] \n \x1b[0m"
    );
    println!("\x1b[33m1. Balance an equation\x1b[0m");
    println!("\x1b[33m2. Balance and show the conservation system\x1b[0m");
    println!("\x1b[33m3. Balance and print JSON\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    io::stdout().flush().unwrap();
}

fn get_user_input() -> String {
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .expect("Failed to read input");
    input
}

fn read_equation() -> String {
    print!("\x1b[36mEnter the equation: \x1b[0m");
    io::stdout().flush().unwrap();
    get_user_input().trim().to_string()
}

fn balance_menu() {
    let input = read_equation();
    match compute(&input) {
        Ok(result) => println!("\x1b[32m{}\x1b[0m", result.rendered),
        Err(e) => println!("\x1b[31mError: {e}\x1b[0m"),
    }
}

/// runs the pipeline stage by stage so the conservation system can be shown
/// before solving
fn system_menu() {
    let input = read_equation();
    let mut balancer = ChemEqBalancer::from_input(&input);
    balancer.scan_input();
    if let Err(e) = balancer.validate_ast() {
        println!("\x1b[31mError: {e}\x1b[0m");
        return;
    }
    balancer.simplify_sides();
    balancer.build_system();
    if let Some(system) = &balancer.system {
        system.pretty_print();
    }
    match balancer.solve_system() {
        Ok(()) => {
            balancer.write_back();
            println!("\x1b[32m{}\x1b[0m", balancer.render_solution());
        }
        Err(e) => println!("\x1b[31mError: {e}\x1b[0m"),
    }
}

fn json_menu() {
    let input = read_equation();
    match compute(&input) {
        Ok(result) => match result.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => println!("\x1b[31mError: {e}\x1b[0m"),
        },
        Err(e) => println!("\x1b[31mError: {e}\x1b[0m"),
    }
}
