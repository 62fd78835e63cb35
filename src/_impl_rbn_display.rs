use crate::Rbn;
use std::fmt::{Display, Error, Formatter};

impl Display for Rbn {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for node in self.topology().nodes() {
            // print the declared function head, then the ordered inputs
            write!(f, "{}: {}(", self.topology()[node], self.get_function(node))?;
            let inputs = self.topology().inputs(node);
            for (i, input) in inputs.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.topology()[*input])?;
            }
            writeln!(f, ")")?;
        }
        Ok(())
    }
}
