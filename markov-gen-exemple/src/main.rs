use markov_gen_core::model::generator::Generator;
use markov_gen_core::model::settings::Settings;
use markov_gen_core::MarkovError;

const SAMPLE: &str = "the cat sat on the mat and the dog sat on the rug \
    the cat saw the dog and the dog saw the cat \
    then the cat ran to the mat and the dog ran to the rug";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Chain length 2: keys and continuations are pairs of words
    let mut settings = Settings::default();
    settings.set_chain_length(2)?;
    settings.set_word_count(20);

    // A chain length of 0 is rejected
    match Settings::default().set_chain_length(0) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("Chain length 0 is invalid: {e}"),
    }

    let mut app = Generator::new(settings)?;

    // Generating before loading anything fails
    match app.generate() {
        Err(MarkovError::Uninitialized) => println!("Nothing loaded yet"),
        _ => println!("Should not happen"),
    }

    // Train on the file given as first argument, or on the built-in sample
    match std::env::args().nth(1) {
        Some(path) => app.load_file(&path)?,
        None => app.load_text(SAMPLE)?,
    }

    if let Some(table) = app.table() {
        println!(
            "Trained {} distinct keys from {} words",
            table.len(),
            table.observations()
        );
    }

    // Generate 10 texts of up to ~20 words
    for i in 0..10 {
        println!("Generated text {}: {}", i + 1, app.generate()?);
    }

    // Short requests stop at the seed
    println!("Seed only: {}", app.generate_words(1)?);

    Ok(())
}
