// SPDX-License-Identifier: Apache-2.0

//! File-to-file round trip over the stream backend.
//!
//! Reads a point record from the input file and writes it back out
//! pretty-printed: `file_roundtrip [in.json] [out.json]`.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use mirrorjson::{Error, JsonIo, JsonReader, JsonWriter, StreamReader, StreamWriter};

#[derive(Debug, Default)]
struct Obj {
    n: u64,
    points: Vec<(i32, i32)>,
}

fn read_obj<Io: JsonIo>(r: &mut JsonReader<Io>) -> Result<Obj, Error> {
    let mut obj = Obj::default();
    r.begin_object("root")?;
    obj.n = r.read_u64("n")?;
    r.begin_array("points")?;
    for _ in 0..obj.n {
        r.begin_object("point")?;
        let x = r.read_i32("x")?;
        let y = r.read_i32("y")?;
        r.end_object()?;
        obj.points.push((x, y));
    }
    r.end_array()?;
    r.end_object()?;
    Ok(obj)
}

fn write_obj<Io: JsonIo>(w: &mut JsonWriter<Io>, obj: &Obj) -> Result<(), Error> {
    w.begin_object("root")?;
    w.write_u64("n", obj.n)?;
    w.begin_array("points")?;
    for &(x, y) in &obj.points {
        w.begin_object("point")?;
        w.write_i32("x", x)?;
        w.write_i32("y", y)?;
        w.end_object()?;
    }
    w.end_array()?;
    w.end_object()
}

fn main() -> std::process::ExitCode {
    let mut args = std::env::args().skip(1);
    let in_path = args.next().unwrap_or_else(|| "in.json".into());
    let out_path = args.next().unwrap_or_else(|| "out.json".into());

    let infile = match File::open(&in_path) {
        Ok(f) => f,
        Err(err) => {
            eprintln!("failed to open {in_path}: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };
    let mut reader = JsonReader::new(StreamReader::new(BufReader::new(infile)));
    let obj = match read_obj(&mut reader) {
        Ok(obj) => obj,
        Err(err) => {
            eprintln!("{in_path}:{}: {err}", reader.line());
            return std::process::ExitCode::FAILURE;
        }
    };

    let outfile = match File::create(&out_path) {
        Ok(f) => f,
        Err(err) => {
            eprintln!("failed to create {out_path}: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };
    let mut writer = JsonWriter::new(StreamWriter::new(BufWriter::new(outfile)));
    if let Err(err) = write_obj(&mut writer, &obj) {
        eprintln!("writing {out_path}: {err}");
        return std::process::ExitCode::FAILURE;
    }
    if writer.finish().is_err() {
        eprintln!("writing {out_path}: unbalanced document");
        return std::process::ExitCode::FAILURE;
    }
    println!("{} point(s) copied to {out_path}", obj.n);
    std::process::ExitCode::SUCCESS
}
