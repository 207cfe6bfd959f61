/// Compiles chunk code into an engine specific bytecode payload.
pub trait BytecodeCompiler: Send + Sync {
  fn compile(&self, filename: &str, code: &str) -> anyhow::Result<Vec<u8>>;
}
