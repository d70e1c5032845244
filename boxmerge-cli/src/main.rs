use boxmerge::{BoundingBox, SuppressConfig, Suppressor};
use clap::Parser;
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod labels;

#[derive(Parser, Debug)]
#[command(author, version, about = "Merging NMS over pre-decoded detections")]
struct Cli {
    /// JSON file holding an array of raw detections.
    detections: PathBuf,
    /// IoU percentage above which boxes merge (strict comparison).
    #[arg(short = 't', long, default_value_t = 50)]
    iou_threshold: i32,
    /// Drop candidates scoring at or below this percentage before NMS.
    #[arg(long, default_value_t = 0)]
    score_threshold: i32,
    /// Maximum raw boxes kept per class.
    #[arg(long, default_value_t = 10)]
    max_boxes_per_class: usize,
    /// Maximum number of distinct classes.
    #[arg(long, default_value_t = 10)]
    max_classes: usize,
    /// Emit survivors as a JSON array instead of text lines.
    #[arg(long)]
    json: bool,
    /// Image to annotate with the surviving boxes.
    #[arg(long, value_name = "FILE")]
    image: Option<PathBuf>,
    /// Where to save the annotated image.
    #[arg(long, value_name = "FILE", default_value = "overlay.png")]
    output: PathBuf,
    /// Enable tracing output of the suppression pass.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
struct DetectionRecord {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    score: i32,
    class_id: i32,
}

impl From<DetectionRecord> for BoundingBox {
    fn from(record: DetectionRecord) -> Self {
        BoundingBox::new(
            record.min_x,
            record.min_y,
            record.max_x,
            record.max_y,
            record.score,
            record.class_id,
        )
    }
}

#[derive(Debug, Serialize)]
struct SurvivorRecord {
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    score: i32,
    class_id: i32,
    label: Option<&'static str>,
}

impl From<&BoundingBox> for SurvivorRecord {
    fn from(survivor: &BoundingBox) -> Self {
        Self {
            min_x: survivor.min_x,
            min_y: survivor.min_y,
            max_x: survivor.max_x,
            max_y: survivor.max_y,
            score: survivor.score,
            class_id: survivor.class_id,
            label: labels::name(survivor.class_id),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env()
                    .add_directive("boxmerge=info".parse()?)
                    .add_directive("boxmerge_cli=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    let text = fs::read_to_string(&cli.detections)?;
    let records: Vec<DetectionRecord> = serde_json::from_str(&text)?;

    let mut session = Suppressor::with_config(SuppressConfig {
        max_boxes_per_class: cli.max_boxes_per_class,
        max_classes: cli.max_classes,
    });
    let mut accepted = 0usize;
    for record in records {
        let detection = BoundingBox::from(record);
        if detection.score <= cli.score_threshold {
            continue;
        }
        match session.submit(detection) {
            Ok(()) => accepted += 1,
            Err(err) => eprintln!("dropped detection for class {}: {err}", detection.class_id),
        }
    }

    let mut survivors: Vec<BoundingBox> = Vec::new();
    session.run(cli.iou_threshold, &mut survivors);
    tracing::info!(
        accepted,
        survivors = survivors.len(),
        "suppression finished"
    );

    if cli.json {
        let output: Vec<SurvivorRecord> = survivors.iter().map(SurvivorRecord::from).collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for survivor in &survivors {
            let label = labels::name(survivor.class_id)
                .map(str::to_owned)
                .unwrap_or_else(|| format!("class{}", survivor.class_id));
            println!(
                "{label} {}% ({}, {}) - ({}, {})",
                survivor.score, survivor.min_x, survivor.min_y, survivor.max_x, survivor.max_y
            );
        }
    }

    if let Some(image_path) = &cli.image {
        let mut canvas = image::open(image_path)?.to_rgb8();
        for survivor in &survivors {
            draw_survivor(&mut canvas, survivor);
        }
        canvas.save(&cli.output)?;
        println!("annotated image written to {}", cli.output.display());
    }

    Ok(())
}

const PALETTE: [Rgb<u8>; 6] = [
    Rgb([230, 57, 70]),
    Rgb([69, 123, 157]),
    Rgb([42, 157, 143]),
    Rgb([233, 196, 106]),
    Rgb([144, 103, 198]),
    Rgb([244, 162, 97]),
];

fn draw_survivor(canvas: &mut RgbImage, survivor: &BoundingBox) {
    let color = PALETTE[survivor.class_id.rem_euclid(PALETTE.len() as i32) as usize];
    let width = (survivor.max_x - survivor.min_x + 1).max(1) as u32;
    let height = (survivor.max_y - survivor.min_y + 1).max(1) as u32;
    draw_hollow_rect_mut(
        canvas,
        Rect::at(survivor.min_x, survivor.min_y).of_size(width, height),
        color,
    );
}
