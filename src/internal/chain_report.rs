#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::pedantic)]

use chain_map::{ChainedHashMap, INITIAL_CAPACITY, LOAD_FACTOR_PERCENT};
use plotters::prelude::*;
use rand::{Rng, distr::Alphanumeric};

// Largest number of keys inserted in the sweep
const MAX_KEYS: usize = 200_000;
// Number of points in the sweep, evenly spaced up to MAX_KEYS
const NUM_STEPS: usize = 10;
const KEY_LENGTH: usize = 12;

const CHAIN_PLOT: &str = "chain_lengths.png";
const CAPACITY_PLOT: &str = "capacity_growth.png";

#[derive(Debug, Clone, Copy)]
struct SweepStep {
    keys: usize,
    capacity: usize,
    load_factor: f64,
    average_chain: f64,
    longest_chain: usize,
}

fn random_key(rng: &mut impl Rng) -> String {
    rng.sample_iter(&Alphanumeric).take(KEY_LENGTH).map(char::from).collect()
}

fn measure(keys: &[String]) -> SweepStep {
    let mut map = ChainedHashMap::new();
    for (i, key) in keys.iter().enumerate() {
        map.set(key.as_str(), i);
    }

    let mut occupied = 0;
    let mut chained = 0;
    let mut longest_chain = 0;
    for len in map.chain_lengths().filter(|&len| len > 0) {
        occupied += 1;
        chained += len;
        longest_chain = longest_chain.max(len);
    }
    let average_chain = if occupied == 0 { 0.0 } else { chained as f64 / occupied as f64 };

    SweepStep {
        keys: map.len(),
        capacity: map.capacity(),
        load_factor: map.load_factor(),
        average_chain,
        longest_chain,
    }
}

fn draw_chain_lengths(steps: &[SweepStep]) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let root = BitMapBackend::new(CHAIN_PLOT, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_chain =
        steps.iter().map(|step| step.longest_chain).max().unwrap_or(1) as f64 * 1.1; // Add 10% margin
    let max_keys = steps.last().map_or(1, |step| step.keys);

    let mut chart = ChartBuilder::on(&root)
        .caption("Bucket Chain Lengths", (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..max_keys, 0.0..max_chain)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc("Entries per Non-Empty Bucket")
        .axis_desc_style((font_family, 16))
        .draw()?;

    // One entry per bucket is the best any chaining table can do
    let reference_style = ShapeStyle::from(&BLACK.mix(0.3)).stroke_width(1);
    chart
        .draw_series(LineSeries::new(vec![(0, 1.0), (max_keys, 1.0)], reference_style))?
        .label("Ideal Chain")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], reference_style));

    let series: [(&str, RGBColor, fn(&SweepStep) -> f64); 2] = [
        ("Average Chain", RGBColor(50, 90, 220), |step| step.average_chain),
        ("Longest Chain", RGBColor(220, 50, 50), |step| step.longest_chain as f64),
    ];
    for (label, color, value) in series {
        let line_style = ShapeStyle::from(&color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(
                steps.iter().map(|step| (step.keys, value(step))),
                line_style,
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
        chart.draw_series(
            steps.iter().map(|step| Circle::new((step.keys, value(step)), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_capacity_growth(steps: &[SweepStep]) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let root = BitMapBackend::new(CAPACITY_PLOT, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_capacity = steps.iter().map(|step| step.capacity).max().unwrap_or(INITIAL_CAPACITY);
    let max_keys = steps.last().map_or(1, |step| step.keys);

    let mut chart = ChartBuilder::on(&root)
        .caption("Bucket Array Growth", (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(0..max_keys, 0..max_capacity + max_capacity / 10)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc("Buckets")
        .axis_desc_style((font_family, 16))
        .draw()?;

    // Fewest buckets that keep a given number of keys under the threshold
    let threshold_style = ShapeStyle::from(&RED.mix(0.3)).stroke_width(1);
    chart
        .draw_series(LineSeries::new(
            vec![(0, 0), (max_keys, max_keys * 100 / LOAD_FACTOR_PERCENT)],
            threshold_style,
        ))?
        .label("Load Factor Threshold")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], threshold_style));

    let color = RGBColor(50, 180, 50);
    let line_style = ShapeStyle::from(&color).stroke_width(2);
    chart
        .draw_series(LineSeries::new(steps.iter().map(|step| (step.keys, step.capacity)), line_style))?
        .label("Capacity")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
    chart.draw_series(
        steps.iter().map(|step| Circle::new((step.keys, step.capacity), 4, color.filled())),
    )?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let key_counts: Vec<usize> = (1..=NUM_STEPS).map(|i| MAX_KEYS * i / NUM_STEPS).collect();
    println!("Number of keys: {key_counts:?}");

    // Generate random keys once so every step sees a prefix of the same data
    let mut rng = rand::rng();
    let keys: Vec<String> = (0..MAX_KEYS).map(|_| random_key(&mut rng)).collect();

    let mut steps = Vec::with_capacity(key_counts.len());
    for &n_keys in &key_counts {
        let step = measure(&keys[..n_keys]);
        println!(
            "  {} keys: capacity = {}, load factor = {:.3}, avg chain = {:.3}, longest chain = {}",
            step.keys, step.capacity, step.load_factor, step.average_chain, step.longest_chain
        );
        steps.push(step);
    }

    draw_chain_lengths(&steps)?;
    draw_capacity_growth(&steps)?;

    println!("Generated plot images: {CHAIN_PLOT}, {CAPACITY_PLOT}");

    Ok(())
}
