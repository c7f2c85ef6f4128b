// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod command_line_args;
mod item;
mod itemizer;
mod transaction_reader;

use command_line_args::parse_args_or_exit;
use command_line_args::Arguments;
use fpgrowth::{generate_rules, mine_frequent_itemsets, ItemsetSupport, MinSupport, Rule};
use item::Item;
use itemizer::Itemizer;
use ordered_float::OrderedFloat;
use transaction_reader::TransactionReader;

use std::cmp::Reverse;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use std::time::Instant;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

// Highest confidence first. Ties are ordered by itemset (smaller itemsets
// first), then by antecedent, so output is stable across runs.
fn sort_rules(rules: &mut [Rule<Item>]) {
    rules.sort_by_cached_key(|rule| {
        (
            Reverse(OrderedFloat(rule.confidence())),
            rule.itemset(),
            rule.antecedent.clone(),
        )
    });
}

fn write_rules<W: Write>(
    output: &mut W,
    rules: &[Rule<Item>],
    itemizer: &Itemizer,
) -> io::Result<()> {
    writeln!(output, "Antecedent->Consequent,Confidence,Support")?;
    for rule in rules {
        writeln!(
            output,
            "{} => {},{},{}",
            Item::item_vec_to_string(&rule.antecedent, itemizer),
            Item::item_vec_to_string(&rule.consequent, itemizer),
            rule.confidence(),
            rule.support()
        )?;
    }
    Ok(())
}

fn mine_fp_growth(args: &Arguments) -> Result<(), Box<dyn Error>> {
    info!(path = %args.input_file_path, "mining data set");
    let start = Instant::now();

    let timer = Instant::now();
    let mut itemizer = Itemizer::new();
    let transactions: Vec<Vec<Item>> =
        TransactionReader::open(&args.input_file_path, &mut itemizer)?
            .collect::<io::Result<Vec<Vec<Item>>>>()?;
    info!(
        transactions = transactions.len(),
        distinct_items = itemizer.len(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "read transactions"
    );

    let timer = Instant::now();
    let min_support = MinSupport::from(args.min_support);
    let itemsets = mine_frequent_itemsets(&transactions, min_support, true);
    let min_count = itemsets.min_count();
    let itemset_support = ItemsetSupport::from_mined(itemsets)?;
    info!(
        itemsets = itemset_support.len(),
        min_count,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "FPGrowth generated frequent itemsets"
    );

    let timer = Instant::now();
    let mut rules = generate_rules(&itemset_support, args.min_confidence)?;
    sort_rules(&mut rules);
    info!(
        rules = rules.len(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "generated rules"
    );

    let mut output = BufWriter::new(File::create(&args.output_rules_path)?);
    write_rules(&mut output, &rules, &itemizer)?;
    output.flush()?;

    info!(
        path = %args.output_rules_path,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "wrote rules"
    );
    Ok(())
}

fn main() {
    let arguments = parse_args_or_exit();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if arguments.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    if let Err(err) = mine_fp_growth(&arguments) {
        error!("{}", err);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{sort_rules, write_rules};
    use crate::itemizer::Itemizer;
    use fpgrowth::Rule;

    #[test]
    fn test_write_rules() {
        let mut itemizer = Itemizer::new();
        let a = itemizer.id_of("a");
        let b = itemizer.id_of("b");
        let c = itemizer.id_of("c");
        let rules = vec![Rule {
            antecedent: vec![c, a],
            consequent: vec![b],
            support: 2,
            confidence: 0.5,
        }];
        let mut output: Vec<u8> = vec![];
        write_rules(&mut output, &rules, &itemizer).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Antecedent->Consequent,Confidence,Support\na c => b,0.5,2\n"
        );
    }

    #[test]
    fn test_sort_rules() {
        let mut itemizer = Itemizer::new();
        let a = itemizer.id_of("a");
        let b = itemizer.id_of("b");
        let c = itemizer.id_of("c");
        let rule = |antecedent, consequent, confidence| Rule {
            antecedent,
            consequent,
            support: 1,
            confidence,
        };
        let mut rules = vec![
            rule(vec![a, b], vec![c], 1.0),
            rule(vec![b], vec![c], 0.5),
            rule(vec![c], vec![a], 1.0),
            rule(vec![a], vec![c], 1.0),
            rule(vec![b], vec![a], 1.0),
        ];
        sort_rules(&mut rules);
        let sorted: Vec<(Vec<_>, Vec<_>)> = rules
            .into_iter()
            .map(|rule| (rule.antecedent, rule.consequent))
            .collect();
        // {a,b} sorts before {a,c}, and both before the three item set.
        assert_eq!(
            sorted,
            vec![
                (vec![b], vec![a]),
                (vec![a], vec![c]),
                (vec![c], vec![a]),
                (vec![a, b], vec![c]),
                (vec![b], vec![c]),
            ]
        );
    }
}
