extern crate log;
extern crate pretty_env_logger;

use std::path::{Path, PathBuf};
use std::process::exit;

use bubble_grader::{
    grade_with_debug, option_letter, AnswerKey, GradingOptions, GradingResult, ImageDebugWriter,
};
use clap::{arg, command, Command};
use serde_json::json;

fn main() {
    pretty_env_logger::init_custom_env("LOG");

    let matches = cli().get_matches();
    let debug = matches.get_flag("debug");
    let strict = matches.get_flag("strict");
    let as_json = matches.get_flag("json");
    let photo_path = PathBuf::from(
        matches
            .get_one::<String>("photo_path")
            .expect("photo path is required"),
    );
    let key_path = matches
        .get_one::<String>("key")
        .expect("answer key path is required");
    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| graded_image_path(&photo_path));

    let key: AnswerKey = match read_json(Path::new(key_path)) {
        Ok(key) => key,
        Err(e) => {
            eprintln!("Error reading answer key: {}", e);
            exit(1);
        }
    };

    let mut options: GradingOptions = match matches.get_one::<String>("config") {
        Some(config_path) => match read_json(Path::new(config_path)) {
            Ok(options) => options,
            Err(e) => {
                eprintln!("Error reading grading options: {}", e);
                exit(1);
            }
        },
        None => GradingOptions::default(),
    };
    if strict {
        options.strict_row_count = true;
    }

    let photo = match image::open(&photo_path) {
        Ok(img) => img.into_rgb8(),
        Err(e) => {
            eprintln!("Error opening {}: {}", photo_path.display(), e);
            exit(1);
        }
    };

    let debug_writer = if debug {
        ImageDebugWriter::new(photo_path.clone())
    } else {
        ImageDebugWriter::disabled()
    };

    let result = match grade_with_debug(&photo, &key, &options, &debug_writer) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    if let Err(e) = result.annotated_image.save(&output_path) {
        eprintln!("Error writing {}: {}", output_path.display(), e);
        exit(1);
    }

    if as_json {
        print_json_report(&result, &key, &output_path);
    } else {
        print_report(&result, &key, &output_path);
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::from_str(&json).map_err(|e| format!("{}: {}", path.display(), e))
}

/// `scans/sheet.jpg` becomes `scans/sheet_graded.png`.
fn graded_image_path(photo_path: &Path) -> PathBuf {
    let mut result = photo_path.to_path_buf();
    result.set_file_name(format!(
        "{}_graded.png",
        photo_path.file_stem().unwrap_or_default().to_string_lossy()
    ));
    result
}

fn print_report(result: &GradingResult, key: &AnswerKey, output_path: &Path) {
    println!(
        "Score: {} / {}",
        result.rounded_score(),
        key.max_score().round() as i64
    );
    for outcome in &result.questions {
        println!(
            "  Q{}: marked {}, expected {} -> {}",
            outcome.question + 1,
            option_letter(outcome.selected),
            option_letter(outcome.answer),
            outcome.points_awarded
        );
    }
    for (question, entry) in key
        .iter()
        .filter(|(question, _)| *question >= result.questions.len())
    {
        println!("  Q{}: not graded, expected {}", question + 1, entry);
    }
    if result.is_perfect(key) {
        println!("Perfect score!");
    }
    println!("Annotated sheet: {}", output_path.display());
}

fn print_json_report(result: &GradingResult, key: &AnswerKey, output_path: &Path) {
    let report = json!({
        "score": result.score,
        "roundedScore": result.rounded_score(),
        "maxScore": key.max_score(),
        "perfect": result.is_perfect(key),
        "questions": result.questions,
        "annotatedImage": output_path.display().to_string(),
    });
    println!("{}", report);
}

#[allow(clippy::cognitive_complexity)]
fn cli() -> Command {
    command!()
        .arg(arg!(-k --key <PATH> "Path to the answer key JSON file").required(true))
        .arg(arg!(-c --config <PATH> "Path to a grading options JSON file"))
        .arg(arg!(-o --output <PATH> "Where to write the annotated sheet"))
        .arg(arg!(--strict "Reject sheets whose bubble count does not fill whole rows"))
        .arg(arg!(--json "Print the result as JSON"))
        .arg(arg!(-d --debug "Write intermediate debug images next to the photo"))
        .arg(arg!(photo_path: <PHOTO> "Path to the photo of the answer sheet").required(true))
}
