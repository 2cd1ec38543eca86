use rs_trigram_core::io::read_file;
use rs_trigram_core::model::trigram_model::{DEFAULT_MAX_LENGTH, TrigramModel};

/// Small bundled corpus used when no file is given on the command line.
const SAMPLE: &str = "The rain fell on the quiet town and the river rose under the old bridge.
The baker opened his shop before dawn and the smell of warm bread drifted down the street.
A grey cat watched the square from the steps of the church while the first carts rolled in.
By noon the market was loud with voices and the river kept rising slowly.
When evening came the lamps were lit one by one and the town grew quiet again.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Train on the corpus file given as first argument, or on the sample
    let text = match std::env::args().nth(1) {
        Some(path) => read_file(path)?,
        None => SAMPLE.to_owned(),
    };

    let mut model = TrigramModel::new();
    model.fit(&text);
    println!(
        "Trained on {} tokens ({} distinct contexts)",
        model.token_count(),
        model.context_count()
    );

    // Generate 10 sequences with the conventional length cap
    for i in 0..10 {
        println!("Generated {}: {}", i + 1, model.generate(DEFAULT_MAX_LENGTH));
    }

    // A shorter cap truncates the walk
    println!("Capped at 8 tokens: {}", model.generate(8));

    // Too little text to form a trigram: generation echoes the tokens
    model.fit("the cat");
    println!("Short corpus fallback: {}", model.generate(10));

    // Training on empty text is the supported way to reset the model
    model.fit("");
    match model.generate(10).as_str() {
        "" => println!("After a reset the model generates nothing"),
        other => println!("Should not happen: {other}"),
    }

    Ok(())
}
