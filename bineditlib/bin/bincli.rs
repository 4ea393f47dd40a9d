use bineditlib::{
    Base, ByteNumStr, CellColor, DEFAULT_PAGE_SIDE, LogObserver, PagedByteBuffer, SearchType,
    search,
};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::path::{Path, PathBuf};
use std::process;

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");

    println!(" --------------------------------------------------");
    println!("|  Binary Editor Utility  | v{version}               |");
    println!(" --------------------------------------------------");
    println!("\nUsage:");
    println!("  bincli info <input> [options]");
    println!("  bincli page <input> <page> [options]");
    println!("  bincli search <input> <pattern> [options]");
    println!("  bincli delete <input> <output> --from <idx> --to <idx> [options]");
    println!("  bincli set <input> <output> --index <idx> --value <val> [options]");
    println!("\nOptions:");
    println!("  --side <n>     Page side, a page holds n*n bytes (default: {DEFAULT_PAGE_SIDE})");
    println!("  --base <b>     Base for page dump / set value: 2, 8, 10, 16 (default: 16)");
    println!("  --mode <m>     Search mode: hex, ascii, regex (default: hex)");
    println!("  --find <hex>   Highlight a hex pattern in the page dump");
    println!("  -v             Verbose logging");
    println!("\nExamples:");
    println!("  bincli info firmware.bin --side 20");
    println!("  bincli page firmware.bin 3 --base 2");
    println!("  bincli search firmware.bin \"de ad be ef\"");
    println!("  bincli delete firmware.bin trimmed.bin --from 0x10 --to 0x1F");
    println!("  bincli set firmware.bin patched.bin --index 4 --value 255 --base 10");
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let level = if args.iter().any(|a| a == "-v") {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // A logger may already be set when embedded; tracing is best effort
    if let Err(e) = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Warning: logging disabled: {e}");
    }

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = &args[1];

    // Dispatch and immediately handle results
    if let Err(e) = run_dispatch(command, &args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run_dispatch(cmd: &str, args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        "info" => {
            let path_str = args.get(2).ok_or("Missing input file path")?;
            let abs_path = validate_exists(path_str)?;

            run_info(&abs_path, get_side(args)?)
        }
        "page" => {
            let path_str = args.get(2).ok_or("Missing input file path")?;
            let page_str = args.get(3).ok_or("Missing page number")?;
            let abs_path = validate_exists(path_str)?;

            let page = parse_index(page_str).map_err(|_e| format!("Invalid page: {page_str}"))?;
            let base = get_base(args)?;

            let find = match get_flag_value(args, "--find") {
                Some(pattern) => Some(
                    SearchType::parse_hex(&pattern)
                        .ok_or_else(|| format!("Invalid hex pattern: {pattern}"))?,
                ),
                None => None,
            };

            run_page(&abs_path, page, get_side(args)?, base, find.as_ref())
        }
        "search" => {
            let path_str = args.get(2).ok_or("Missing input file path")?;
            let pattern = args.get(3).ok_or("Missing search pattern")?;
            let abs_path = validate_exists(path_str)?;

            let mode = get_flag_value(args, "--mode").unwrap_or_else(|| "hex".to_string());
            let search_type = match mode.as_str() {
                "hex" => SearchType::parse_hex(pattern)
                    .ok_or_else(|| format!("Invalid hex pattern: {pattern}"))?,
                "ascii" => SearchType::Ascii(pattern.clone()),
                "regex" => SearchType::Regex(pattern.clone()),
                other => return Err(format!("Unknown search mode: {other}").into()),
            };

            run_search(&abs_path, &search_type, get_side(args)?)
        }
        "delete" => {
            let in_path_str = args.get(2).ok_or("Missing input path")?;
            let out_path_str = args.get(3).ok_or("Missing output path")?;
            let in_abs_path = validate_exists(in_path_str)?;

            let from = get_index_flag(args, "--from")?;
            let to = get_index_flag(args, "--to")?;

            run_delete(
                &in_abs_path,
                &PathBuf::from(out_path_str),
                from,
                to,
                get_side(args)?,
            )
        }
        "set" => {
            let in_path_str = args.get(2).ok_or("Missing input path")?;
            let out_path_str = args.get(3).ok_or("Missing output path")?;
            let in_abs_path = validate_exists(in_path_str)?;

            let index = get_index_flag(args, "--index")?;
            let value = get_flag_value(args, "--value")
                .ok_or("Missing '--value' flag or the value after it")?;

            run_set(
                &in_abs_path,
                &PathBuf::from(out_path_str),
                index,
                &value,
                get_base(args)?,
                get_side(args)?,
            )
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }
}

fn run_info(path: &Path, side: usize) -> Result<(), Box<dyn std::error::Error>> {
    let buf = load_buffer(path, side)?;

    println!("File Path:   {}", path.display());
    println!("Data Size:   {} bytes", buf.len());
    println!("Page Size:   {side}x{side} ({} bytes)", side * side);
    println!("Pages:       {}", buf.get_max_page() + 1);
    Ok(())
}

fn run_page(
    path: &Path,
    page: usize,
    side: usize,
    base: u32,
    find: Option<&SearchType>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut buf = load_buffer(path, side)?;

    if page > buf.get_max_page() {
        return Err(format!("Page {page} out of range (max page: {})", buf.get_max_page()).into());
    }

    if let Some(search_type) = find {
        buf.find_and_highlight(search_type);
    }

    while buf.get_page_num() < page {
        buf.next_page();
    }

    let conv = ByteNumStr::new(base);
    let width = conv.to_string(u8::MAX)?.len();

    println!("Page {page} of {}", buf.get_max_page());
    for row in 0..side {
        let start = page * side * side + row * side;
        if start >= buf.len() {
            break;
        }

        let mut line = format!("{start:08X} ");
        for col in 0..side {
            let visible = row * side + col;
            let text = match buf.cell_value(visible) {
                Some(hex) => conv.to_string(u8::from_str_radix(hex, 16)?)?,
                None => "--".to_string(),
            };
            let marker = if buf.cell_color(visible) == CellColor::Highlighted {
                '*'
            } else {
                ' '
            };
            line.push_str(&format!(" {text:>width$}{marker}"));
        }
        println!("{}", line.trim_end());
    }
    Ok(())
}

fn run_search(
    path: &Path,
    search_type: &SearchType,
    side: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut buf = load_buffer(path, side)?;
    let matches = search(&buf.get_data(), search_type);

    for range in &matches {
        println!(
            "0x{:08X} - 0x{:08X} (page {})",
            range.start,
            range.end - 1,
            buf.page_of(range.start)
        );
    }
    println!("Hits: {}", matches.len());
    Ok(())
}

fn run_delete(
    in_path: &Path,
    out_path: &Path,
    from: usize,
    to: usize,
    side: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut buf = load_buffer(in_path, side)?;

    // Click the first byte, shift-click the last one
    click_index(&mut buf, from, false)?;
    click_index(&mut buf, to, true)?;
    buf.delete_selected_bytes();

    let data = buf.get_data();
    write_bytes(out_path, &data)?;

    let out_abs_path = validate_exists(&out_path.to_string_lossy())?;
    println!(
        "Deleted {} byte(s) -> {} ({} bytes)",
        from.abs_diff(to) + 1,
        out_abs_path.display(),
        data.len()
    );
    Ok(())
}

fn run_set(
    in_path: &Path,
    out_path: &Path,
    index: usize,
    value: &str,
    base: u32,
    side: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let conv = ByteNumStr::new(base);
    if value.is_empty() || !conv.is_valid(value)? {
        return Err(format!("Invalid value '{value}' for base {base}").into());
    }
    let byte = conv.to_int(value)?;

    let mut buf = load_buffer(in_path, side)?;
    let visible = show_index(&mut buf, index)?;
    if !buf.set_cell_text(visible, &format!("{byte:02x}")) {
        return Err(format!("Cannot edit byte at index {index}").into());
    }

    write_bytes(out_path, &buf.get_data())?;

    let out_abs_path = validate_exists(&out_path.to_string_lossy())?;
    println!("Set byte {index} to 0x{byte:02X} -> {}", out_abs_path.display());
    Ok(())
}

// =============================== HELPER FUNCTIONS ===============================

/// Read the file verbatim into a fresh buffer with the given page side
fn load_buffer(path: &Path, side: usize) -> Result<PagedByteBuffer, Box<dyn std::error::Error>> {
    let data = std::fs::read(path)?;
    let mut buf = PagedByteBuffer::with_page_side(side)?;
    buf.set_observer(Box::new(LogObserver));
    buf.set_data(&data);
    Ok(buf)
}

/// Switch to the page holding the document index and return its visible cell
fn show_index(
    buf: &mut PagedByteBuffer,
    index: usize,
) -> Result<usize, Box<dyn std::error::Error>> {
    buf.jump_to(index)?;
    let side = buf.page_side();
    Ok(index - buf.get_page_num() * side * side)
}

/// Click the cell showing the document index
fn click_index(
    buf: &mut PagedByteBuffer,
    index: usize,
    extend: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let visible = show_index(buf, index)?;
    buf.on_cell_clicked(visible, extend)?;
    Ok(())
}

/// Write raw bytes, creating the parent directory if needed
fn write_bytes(path: &Path, data: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, data)?;
    Ok(())
}

/// Parse an index as decimal, or as hex with a 0x prefix
fn parse_index(s: &str) -> Result<usize, std::num::ParseIntError> {
    let s = s.trim();

    if let Some(hex_str) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return usize::from_str_radix(hex_str, 16);
    }

    s.parse()
}

fn get_side(args: &[String]) -> Result<usize, Box<dyn std::error::Error>> {
    let Some(side_str) = get_flag_value(args, "--side") else {
        return Ok(DEFAULT_PAGE_SIDE);
    };
    match parse_index(&side_str) {
        Ok(side) if side > 0 => Ok(side),
        _ => Err(format!("Invalid page side: {side_str}").into()),
    }
}

fn get_base(args: &[String]) -> Result<u32, Box<dyn std::error::Error>> {
    let Some(base_str) = get_flag_value(args, "--base") else {
        return Ok(16);
    };
    let base = base_str
        .parse::<u32>()
        .map_err(|_e| format!("Invalid base: {base_str}"))?;
    Base::try_from(base)?;
    Ok(base)
}

fn get_index_flag(args: &[String], flag: &str) -> Result<usize, Box<dyn std::error::Error>> {
    let value = get_flag_value(args, flag)
        .ok_or_else(|| format!("Missing '{flag}' flag or the value after it"))?;
    Ok(parse_index(&value).map_err(|_e| format!("Invalid index: {value}"))?)
}

/// Validate that a path exists and is a file. Returns absolute path.
fn validate_exists(path_str: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = PathBuf::from(path_str);
    if !path.exists() {
        return Err(format!("File not found: {path_str}").into());
    }
    if !path.is_file() {
        return Err(format!("Path is not a file: {path_str}").into());
    }
    Ok(std::fs::canonicalize(path)?)
}

/// Find the value after a specific flag (e.g., "--side 20")
fn get_flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|pos| args.get(pos + 1))
        .cloned()
}
