//! Evaluate a configured branch predictor against one or more trace
//! files, with optional stateless baselines for comparison.

use anyhow::Result;
use axon::Outcome;
use axon::predictor::{
    Baseline, BranchPredictorConfig, DirectionPredictor, Mode,
    SimplePredictor,
};
use axon::stats::TraceStats;
use axon::trace::{Trace, TraceRecord, TraceSet};
use clap::{value_parser, Arg, ArgAction, Command};
use log::info;

fn run_baseline(records: &[TraceRecord], p: Baseline) {
    let mut stats = TraceStats::new();
    for record in records {
        stats.update(record.pc, p.predict(), record.outcome);
    }
    println!(
        "  {:16} hit rate: {}/{} ({:.2}% correct) ({} misses)",
        p.name(),
        stats.hits(),
        stats.brns(),
        stats.hit_rate() * 100.0,
        stats.misses()
    );
}

fn run_predictor(
    trace: &Trace,
    bpu: &mut impl DirectionPredictor,
) -> TraceStats {
    let mut stats = TraceStats::new();
    for record in trace.records() {
        let predicted = bpu.predict(record.pc);
        stats.update(record.pc, predicted, record.outcome);
        bpu.train(record.pc, record.outcome);
    }
    stats
}

fn report_worst(stats: &TraceStats, n: usize) {
    for (pc, data) in stats.get_low_rate_branches(n) {
        println!(
            "    {:08x}: {:8} occurrences, {:8} hits ({:.2}% correct, \
             taken {}/{})",
            pc,
            data.occ,
            data.hits,
            data.hit_rate() * 100.0,
            data.times_taken(),
            data.occ
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let matches = Command::new("evaluate")
        .about("Evaluate a branch predictor against recorded traces")
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .default_value("gshare")
                .help("Predictor mode: static, gshare, tournament, custom"),
        )
        .arg(
            Arg::new("ghistory")
                .short('g')
                .long("ghistory")
                .value_parser(value_parser!(usize))
                .default_value("13")
                .help("Global history bits"),
        )
        .arg(
            Arg::new("lhistory")
                .short('l')
                .long("lhistory")
                .value_parser(value_parser!(usize))
                .default_value("10")
                .help("Local history bits"),
        )
        .arg(
            Arg::new("pcindex")
                .short('p')
                .long("pcindex")
                .value_parser(value_parser!(usize))
                .default_value("10")
                .help("PC bits indexing the local history table"),
        )
        .arg(
            Arg::new("baselines")
                .long("baselines")
                .action(ArgAction::SetTrue)
                .help("Also report the stateless baseline predictors"),
        )
        .arg(
            Arg::new("worst")
                .long("worst")
                .value_parser(value_parser!(usize))
                .help("Report the N hottest poorly-predicted branches"),
        )
        .arg(
            Arg::new("traces")
                .num_args(1..)
                .required(true)
                .help("Trace files to replay"),
        )
        .get_matches();

    let mode: Mode = matches.get_one::<String>("mode").unwrap().parse()?;
    let cfg = BranchPredictorConfig {
        mode,
        ghist_bits: *matches.get_one::<usize>("ghistory").unwrap(),
        lhist_bits: *matches.get_one::<usize>("lhistory").unwrap(),
        pc_bits: *matches.get_one::<usize>("pcindex").unwrap(),
    };
    let mut bpu = cfg.build()?;
    info!(
        "evaluating {} (g={}, l={}, p={})",
        mode, cfg.ghist_bits, cfg.lhist_bits, cfg.pc_bits
    );

    let files: Vec<String> = matches
        .get_many::<String>("traces")
        .unwrap()
        .cloned()
        .collect();

    for trace in TraceSet::new_from_slice(&files) {
        let trace = trace?;
        println!("[*] {}", trace.name());

        bpu.reset();
        let stats = run_predictor(&trace, &mut bpu);
        println!(
            "  {:16} hit rate: {}/{} ({:.2}% correct) \
             ({} misses, {:.4} mispredict rate)",
            bpu.name(),
            stats.hits(),
            stats.brns(),
            stats.hit_rate() * 100.0,
            stats.misses(),
            stats.mispredict_rate()
        );
        let taken = trace
            .records()
            .iter()
            .filter(|r| r.outcome == Outcome::T)
            .count();
        info!(
            "{}: {} records, {} taken",
            trace.name(),
            trace.num_records(),
            taken
        );

        if let Some(n) = matches.get_one::<usize>("worst") {
            report_worst(&stats, *n);
        }
        if matches.get_flag("baselines") {
            for b in Baseline::ALL {
                run_baseline(trace.records(), b);
            }
        }
    }

    Ok(())
}
