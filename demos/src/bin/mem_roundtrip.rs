// SPDX-License-Identifier: Apache-2.0

//! In-memory round trip with a growable output buffer.
//!
//! Parses a fixed document into a record, then serializes it back,
//! doubling the buffer and restarting whenever the writer reports the
//! sink is full. The engine has no mid-document resume for writes;
//! restart-from-scratch is the intended recovery.

use mirrorjson::{Error, JsonReader, JsonWriter, SliceReader, SliceWriter};

const INPUT: &str = r#"{"n": 4,"points": [{"x": 0,"y": 0},{"x": 10,"y": 0},{"x": 10,"y": 10},{"x": 0,"y": 10}]}"#;

#[derive(Debug, Default)]
struct Obj {
    n: u64,
    points: Vec<Point>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Point {
    x: i32,
    y: i32,
}

fn read_point(r: &mut JsonReader<SliceReader<'_>>, name: &str) -> Result<Point, Error> {
    r.begin_object(name)?;
    let x = r.read_i32("x")?;
    let y = r.read_i32("y")?;
    r.end_object()?;
    Ok(Point { x, y })
}

fn read_obj(text: &str) -> Result<Obj, Error> {
    let mut r = JsonReader::new(SliceReader::new(text.as_bytes()));
    let mut obj = Obj::default();
    r.begin_object("root")?;
    obj.n = r.read_u64("n")?;
    r.begin_array("points")?;
    for _ in 0..obj.n {
        obj.points.push(read_point(&mut r, "point")?);
    }
    r.end_array()?;
    r.end_object()?;
    r.finish()?;
    Ok(obj)
}

fn write_obj(buf: &mut [u8], obj: &Obj) -> Result<usize, Error> {
    let mut w = JsonWriter::compact(SliceWriter::new(buf));
    w.begin_object("root")?;
    w.write_u64("n", obj.n)?;
    w.begin_array("points")?;
    for p in &obj.points {
        w.begin_object("point")?;
        w.write_i32("x", p.x)?;
        w.write_i32("y", p.y)?;
        w.end_object()?;
    }
    w.end_array()?;
    w.end_object()?;
    Ok(w.finish()?.len())
}

fn main() -> std::process::ExitCode {
    let obj = match read_obj(INPUT) {
        Ok(obj) => obj,
        Err(err) => {
            eprintln!("err @ read_obj: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    let mut cap = 64;
    loop {
        let mut buf = vec![0u8; cap];
        match write_obj(&mut buf, &obj) {
            Ok(len) => {
                println!("{}", String::from_utf8_lossy(&buf[..len]));
                return std::process::ExitCode::SUCCESS;
            }
            Err(Error::OutputFull) if cap < 1024 => {
                eprintln!("err @ write_obj: buffer of {cap} too small, retrying");
                cap *= 2;
            }
            Err(err) => {
                eprintln!("err @ write_obj: {err}");
                return std::process::ExitCode::FAILURE;
            }
        }
    }
}
