/// Diagnostic: compress, decompress, or dump the chunk layout of a container.
///
///   ovba_tool compress <input> <output>
///   ovba_tool decompress <input> <output>
///   ovba_tool inspect <input>
use anyhow::{bail, Context, Result};
use ovba_compression::compression::{CompressedContainer, Token};
use ovba_compression::{Compressor, Decompressor, VbaCompressor, VbaDecompressor};
use std::fs;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [cmd, input, output] if cmd == "compress" => {
            let data = fs::read(input).with_context(|| format!("reading {input}"))?;
            let mut compressor = VbaCompressor::new();
            let compressed = compressor.compress(&data)?;
            fs::write(output, &compressed).with_context(|| format!("writing {output}"))?;
            println!("{} -> {} bytes", data.len(), compressed.len());
            for n in compressor.notifications() {
                println!("{n}");
            }
        }
        [cmd, input, output] if cmd == "decompress" => {
            let data = fs::read(input).with_context(|| format!("reading {input}"))?;
            let mut decompressor = VbaDecompressor::new();
            let decompressed = decompressor
                .decompress(&data)
                .with_context(|| format!("decompressing {input}"))?;
            fs::write(output, &decompressed).with_context(|| format!("writing {output}"))?;
            println!("{} -> {} bytes", data.len(), decompressed.len());
            for n in decompressor.notifications() {
                println!("{n}");
            }
        }
        [cmd, input] if cmd == "inspect" => {
            let data = fs::read(input).with_context(|| format!("reading {input}"))?;
            inspect(&data)?;
        }
        _ => bail!("usage: ovba_tool (compress <in> <out> | decompress <in> <out> | inspect <in>)"),
    }

    Ok(())
}

fn inspect(data: &[u8]) -> Result<()> {
    let container = CompressedContainer::parse(data)?;
    println!("{} chunk(s)", container.len());

    let mut total = 0usize;
    for (index, chunk) in container.chunks().iter().enumerate() {
        let decoded = chunk.decompress()?.len();
        total += decoded;

        if chunk.is_compressed() {
            let copies = chunk.tokens().filter(|t| matches!(t, Token::Copy(_))).count();
            let literals = chunk.tokens().count() - copies;
            println!(
                "  #{index:<4} compressed size={:<5} sequences={:<4} literals={literals:<5} copies={copies:<5} decoded={decoded}",
                chunk.header().chunk_size(),
                chunk.sequences().len(),
            );
        } else {
            println!(
                "  #{index:<4} raw        size={:<5} decoded={decoded}",
                chunk.header().chunk_size()
            );
        }
    }

    println!("decompressed total: {total} bytes");
    Ok(())
}
