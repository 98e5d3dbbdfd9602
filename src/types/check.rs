use tracing::{debug, instrument};

use super::error::TypeError;
use super::infer::Infer;
use super::ty::Type;
use crate::core::CoreExpr;
use crate::library::Library;

/// Infer the type of a whole program.
///
/// The assumption is seeded with every library entry, and the final
/// substitution is applied to the result so the returned type mentions no
/// solved variables.
#[instrument(skip_all)]
pub fn infer(expr: &CoreExpr, library: &Library) -> Result<Type, TypeError> {
    let mut engine = Infer::new(library);
    let (subst, ty) = engine.infer_expr(&library.assumption(), expr)?;
    let ty = subst.apply(&ty);
    debug!(ty = %ty, "program type");
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::error::InferenceError;

    #[test]
    fn test_infer_program_with_standard_library() {
        let lib = Library::standard();
        let expr = CoreExpr::apply(CoreExpr::var("print"), CoreExpr::string("Hello"));
        assert_eq!(infer(&expr, &lib), Ok(Type::string()));
    }

    #[test]
    fn test_infer_program_reports_first_error() {
        let lib = Library::standard();
        let expr = CoreExpr::apply(CoreExpr::reference("print"), CoreExpr::int(1));
        assert_eq!(
            infer(&expr, &lib),
            Err(TypeError::Inference(InferenceError::mismatch("String", "Int")))
        );
    }

    #[test]
    fn test_polymorphic_library_entries() {
        let lib = Library::standard();
        // p(inspect(p(7)))
        let expr = CoreExpr::apply(
            CoreExpr::reference("p"),
            CoreExpr::apply(
                CoreExpr::reference("inspect"),
                CoreExpr::apply(CoreExpr::reference("p"), CoreExpr::int(7)),
            ),
        );
        assert_eq!(infer(&expr, &lib), Ok(Type::string()));
    }
}
