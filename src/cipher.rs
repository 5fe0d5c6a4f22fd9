use crate::Automaton;

/// An unencrypted bit sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plaintext<T>(pub T);

/// An encrypted bit sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext<T>(pub T);

/// A symmetric cipher over bit sequences.
///
/// Decrypting an encryption of a plaintext must restore it. The converse
/// direction is not required, and for the automaton cipher does not hold in
/// general: encryption can fail outright on plaintexts whose masked form has
/// no automaton pre-image.
pub trait Cipher {
    type Err;

    /// Encrypt the plaintext.
    fn encrypt(&mut self, data: Plaintext<&[u8]>) -> Result<Ciphertext<Vec<u8>>, Self::Err>;

    /// Decrypt the ciphertext. Fails if the ciphertext was not produced by
    /// this cipher under the same key and seed.
    fn decrypt(&mut self, data: Ciphertext<&[u8]>) -> Result<Plaintext<Vec<u8>>, Self::Err>;
}

/// The chain-rule automaton cipher.
///
/// Encryption treats the plaintext as the automaton's *final* state: the bits
/// are XOR-ed with the noise mask to break up flat regions, the automaton
/// runs backward the configured number of steps, and the state it arrives at
/// is the ciphertext. Decryption runs the same automaton forward from the
/// ciphertext and strips the mask off the result.
impl Cipher for Automaton {
    type Err = crate::Error;

    fn encrypt(&mut self, data: Plaintext<&[u8]>) -> Result<Ciphertext<Vec<u8>>, Self::Err> {
        self.set_end(data.0.to_vec())?;
        self.xor_end()?;
        self.run_backward()?;
        Ok(Ciphertext(
            self.start().unwrap_or_else(|| unreachable!()).to_vec(),
        ))
    }

    fn decrypt(&mut self, data: Ciphertext<&[u8]>) -> Result<Plaintext<Vec<u8>>, Self::Err> {
        self.set_start(data.0.to_vec())?;
        self.run_forward()?;
        self.xor_end()?;
        Ok(Plaintext(
            self.end().unwrap_or_else(|| unreachable!()).to_vec(),
        ))
    }
}
