//! Hand-rolled CLI argument parsing and dispatch for the `pathjson` binary.
//!
//! No external arg-parsing dependency is introduced here — a single binary
//! with a handful of subcommands and flags is small enough for a hand-rolled
//! option loop.

use std::env;
use std::fs;
use std::io::{self, Read, Write};

use crate::printf::PrintfArg;
use crate::setf::{vsetf, Mutation};
use crate::sink::VecSink;
use crate::walker::walk;

fn print_help(program: &str) {
    eprintln!(
        "Usage: {prog} <COMMAND> [ARGS...]\n\
         \n\
         Commands:\n\
           prettify [FILE] [--in-place]     Pretty-print JSON (stdin if FILE omitted)\n\
           walk [FILE]                      Dump one line per token: TYPE PATH\n\
           get PATH [FILE]                  Print the raw text of the value at PATH\n\
           set PATH VALUE [FILE] [-o OUT]   Insert/replace PATH with the literal VALUE\n\
           del PATH [FILE] [-o OUT]         Delete PATH\n\
           -h, --help                       Show this help\n",
        prog = program
    );
}

struct Invocation {
    command: String,
    positionals: Vec<String>,
    output: Option<String>,
    in_place: bool,
}

fn parse_args() -> Result<Invocation, i32> {
    let mut args: Vec<String> = env::args().collect();
    let program = args.first().cloned().unwrap_or_else(|| "pathjson".into());
    args.remove(0);

    if args.is_empty() || matches!(args[0].as_str(), "-h" | "--help") {
        print_help(&program);
        return Err(if args.is_empty() { 2 } else { 0 });
    }

    let command = args.remove(0);
    let mut positionals = Vec::new();
    let mut output = None;
    let mut in_place = false;
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Missing FILE for --output");
                    return Err(2);
                }
                output = Some(args[i].clone());
            }
            "--in-place" => in_place = true,
            other => positionals.push(other.to_string()),
        }
        i += 1;
    }

    Ok(Invocation {
        command,
        positionals,
        output,
        in_place,
    })
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(p) => fs::read_to_string(p),
        None => {
            let mut s = String::new();
            io::stdin().read_to_string(&mut s)?;
            Ok(s)
        }
    }
}

fn write_output(inv: &Invocation, input_path: Option<&str>, content: &str) -> io::Result<()> {
    if inv.in_place {
        let path = input_path.ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "--in-place requires FILE")
        })?;
        fs::write(path, content)
    } else if let Some(out) = &inv.output {
        fs::write(out, content)
    } else {
        io::stdout().write_all(content.as_bytes())
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let inv = match parse_args() {
        Ok(inv) => inv,
        Err(0) => return Ok(()),
        Err(code) => std::process::exit(code),
    };

    match inv.command.as_str() {
        "prettify" => {
            let file = inv.positionals.first().map(String::as_str);
            let input = read_input(file)?;
            let pretty = crate::prettify::prettify_to_string(&input)?;
            write_output(&inv, file, &pretty)?;
        }
        "walk" => {
            let file = inv.positionals.first().map(String::as_str);
            let input = read_input(file)?;
            let mut lines = String::new();
            walk(&input, &crate::options::WalkOptions::default(), |ev| {
                lines.push_str(&format!("{:?} {}\n", ev.token.ty, ev.path));
            })?;
            write_output(&inv, file, &lines)?;
        }
        "get" => {
            let path = inv
                .positionals
                .first()
                .ok_or("get requires a PATH argument")?
                .clone();
            let file = inv.positionals.get(1).map(String::as_str);
            let input = read_input(file)?;
            let mut found = None;
            walk(&input, &crate::options::WalkOptions::default(), |ev| {
                if found.is_none() && ev.path == path {
                    if let Some((s, e)) = ev.token.span() {
                        found = Some(input[s..e].to_string());
                    }
                }
            })?;
            match found {
                Some(text) => write_output(&inv, file, &format!("{text}\n"))?,
                None => std::process::exit(1),
            }
        }
        "set" => {
            let path = inv
                .positionals
                .first()
                .ok_or("set requires a PATH argument")?
                .clone();
            let value = inv
                .positionals
                .get(1)
                .ok_or("set requires a VALUE argument")?
                .clone();
            let file = inv.positionals.get(2).map(String::as_str);
            let input = read_input(file)?;
            let mut sink = VecSink::new();
            let emit_raw = |s: &mut dyn crate::sink::Sink| {
                s.write_str(&value);
            };
            let args = [PrintfArg::Func(&emit_raw)];
            vsetf(&input, &path, Mutation::Set { fmt: "%M", args: &args }, &mut sink)?;
            write_output(&inv, file, &sink.into_string())?;
        }
        "del" => {
            let path = inv
                .positionals
                .first()
                .ok_or("del requires a PATH argument")?
                .clone();
            let file = inv.positionals.get(1).map(String::as_str);
            let input = read_input(file)?;
            let mut sink = VecSink::new();
            vsetf(&input, &path, Mutation::Delete, &mut sink)?;
            write_output(&inv, file, &sink.into_string())?;
        }
        other => {
            eprintln!("Unknown command: {other}");
            std::process::exit(2);
        }
    }
    Ok(())
}
