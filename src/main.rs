//! Command-line front end: generate shared keys, encrypt and decrypt
//! greyscale images.

use {
    cacrypt::{bits, image, Automaton, Error, Key, Result},
    clap::Parser,
    log::{debug, info},
    std::{num::NonZeroU32, path::PathBuf, process},
};

/// Encrypt and decrypt greyscale images with a reversible cellular
/// automaton, after Wuensche and Lesser.
#[derive(Debug, Parser)]
#[command(about)]
struct Opt {
    /// The filename of the shared key.
    #[arg(short = 'f', long = "keyFile-name", default_value = "key.shared")]
    key_file: PathBuf,

    /// Generate a shared keyfile.
    #[arg(short = 'G', long = "Gen")]
    generate: bool,

    /// The neighborhood size (must be odd).
    #[arg(short = 'k', long = "K", default_value_t = 7)]
    k: usize,

    /// The number of automaton steps to take for encryption/decryption.
    #[arg(short = 'T', long = "T", default_value_t = 5)]
    steps: usize,

    /// The seed for the noise mask; negative draws one at random.
    #[arg(short = 'N', long = "N", default_value_t = -1, allow_hyphen_values = true)]
    noise_seed: i64,

    /// Use a verbose output.
    #[arg(short = 'V', long = "verbose")]
    verbose: bool,

    /// The input greyscale image.
    #[arg(short = 'B', long = "BW", default_value = "img.png")]
    input: PathBuf,

    /// Output filename, default either encrypted.png or decrypted.png.
    #[arg(short = 'O', long = "output-file")]
    output: Option<PathBuf>,

    /// Save the intermediate image after every step.
    #[arg(short = 'S', long = "verbose-save")]
    save_steps: bool,

    /// Encrypt the given input file.
    #[arg(short = 'E', long = "Enc")]
    encrypt: bool,

    /// Decrypt the given input file.
    #[arg(short = 'D', long = "Dec")]
    decrypt: bool,
}

fn main() {
    let opt = Opt::parse();
    env_logger::Builder::new()
        .filter_level(if opt.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .init();

    if let Err(e) = run(&opt) {
        eprintln!("ERROR : {e}");
        process::exit(1);
    }
}

fn run(opt: &Opt) -> Result<()> {
    match (opt.generate, opt.encrypt, opt.decrypt) {
        (true, true, _) => Err(invalid("cannot have -G and -E flags set")),
        (true, _, true) => Err(invalid("cannot have -G and -D flags set")),
        (_, true, true) => Err(invalid("cannot have -E and -D flags set")),
        (true, false, false) => generate(opt),
        (false, true, false) => encrypt(opt),
        (false, false, true) => decrypt(opt),
        (false, false, false) => {
            println!("No action flag was given, use one of:");
            println!("    -G :: generate a shared key file");
            println!("    -E :: encrypt an input image");
            println!("    -D :: decrypt an input image");
            Ok(())
        }
    }
}

fn generate(opt: &Opt) -> Result<()> {
    // The noise seed is validated like in any other mode, but the key file
    // does not record it.
    chosen_noise_seed(opt.noise_seed)?;
    let key = Key::generate(opt.k, opt.steps, None)?;
    key.save(&opt.key_file)?;
    info!(
        "generated a key with k={}, T={}, Z_right={} into '{}'",
        key.k(),
        key.steps(),
        key.rules().z_right(),
        opt.key_file.display()
    );
    Ok(())
}

fn encrypt(opt: &Opt) -> Result<()> {
    let key = Key::load(&opt.key_file)?;
    let mut ca = Automaton::new(key);
    let seed = match chosen_noise_seed(opt.noise_seed)? {
        Some(seed) => {
            ca.set_mask_seed(seed);
            seed
        }
        None => ca.random_mask_seed(&mut rand::thread_rng()),
    };

    info!(
        "attempting to encrypt the greyscale image '{}'",
        opt.input.display()
    );
    let (tape, dims) = image::read_grayscale(&opt.input)?;
    report_entropy("input", &tape)?;

    ca.set_end(tape)?;
    ca.xor_end()?;
    debug!("XORed the input with noise generated from seed {seed}");
    info!(
        "attempting {} encryption steps with k={}",
        ca.steps(),
        ca.rules().k()
    );
    if opt.save_steps {
        ca.run_backward_with(|i, tape| image::write_grayscale(format!("enc{i}.png"), tape, dims))?;
    } else {
        ca.run_backward()?;
    }

    let cipher = ca.start().unwrap_or_else(|| unreachable!());
    report_entropy("output", cipher)?;
    let output = opt
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("encrypted.png"));
    image::write_grayscale(&output, cipher, dims)?;
    info!("save of encrypted image to '{}' successful", output.display());

    // Decryption needs the seed back, so it is program output rather than a
    // log line.
    println!("    = random noise seed {seed}");
    Ok(())
}

fn decrypt(opt: &Opt) -> Result<()> {
    let key = Key::load(&opt.key_file)?;
    let mut ca = Automaton::new(key);
    let seed = chosen_noise_seed(opt.noise_seed)?
        .ok_or_else(|| invalid("noise seed must be set for decryption"))?;
    ca.set_mask_seed(seed);

    info!(
        "attempting to decrypt the greyscale image '{}'",
        opt.input.display()
    );
    let (tape, dims) = image::read_grayscale(&opt.input)?;

    ca.set_start(tape)?;
    info!(
        "attempting {} decryption steps with k={}",
        ca.steps(),
        ca.rules().k()
    );
    if opt.save_steps {
        ca.run_forward_with(|i, tape| image::write_grayscale(format!("dec{i}.png"), tape, dims))?;
    } else {
        ca.run_forward()?;
    }
    ca.xor_end()?;
    debug!("XORed the final step with noise generated from seed {seed}");

    let plain = ca.end().unwrap_or_else(|| unreachable!());
    let output = opt
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from("decrypted.png"));
    image::write_grayscale(&output, plain, dims)?;
    info!("save of decrypted image to '{}' successful", output.display());
    Ok(())
}

/// Resolve the `-N` flag: a positive seed is clamped to 32 bits, a negative
/// one means "draw at random", and zero is forbidden (it is this flag's
/// unset sentinel).
fn chosen_noise_seed(flag: i64) -> Result<Option<NonZeroU32>> {
    if flag < 0 {
        return Ok(None);
    }
    let clamped = (flag as u64 % (1 << 32)) as u32;
    match NonZeroU32::new(clamped) {
        Some(seed) => Ok(Some(seed)),
        None => Err(invalid("noise seed cannot be 0")),
    }
}

fn report_entropy(which: &str, tape: &[u8]) -> Result<()> {
    if log::log_enabled!(log::Level::Debug) {
        let (shannon, metric) = bits::shannon_entropy(tape)?;
        debug!("{which} entropy: S={shannon:.6} M={metric:.9}");
    }
    Ok(())
}

fn invalid(msg: &str) -> Error {
    Error::InvalidArgument(msg.into())
}
