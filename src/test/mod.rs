use std::sync::Arc;

use crate::{
    analysis::cha::HierarchyIndex,
    program::{
        Class, ClassFlags, Instruction, Method, MethodFlags, MethodRc, MethodRef, Program, Type,
    },
};

// Helper function to create a Type
pub fn ty(name: &str) -> Type {
    Type::new(name)
}

// `speak()V`
pub fn speak() -> MethodRef {
    MethodRef::new("speak", ty("V"), vec![])
}

// `name()Ljava/lang/String;`
pub fn pet_name() -> MethodRef {
    MethodRef::new("name", ty("Ljava/lang/String;"), vec![])
}

/// Small hierarchy shared by the unit tests.
///
/// ```text
/// LAnimal;  speak()            LPet; (interface) abstract name()
/// ├── LDog;  speak(), name()   implements LPet;
/// │   └── LPuppy;  name()
/// └── LCat;  name()            implements LPet;
/// ```
pub fn zoo() -> Program {
    let void = ty("V");
    let string = ty("Ljava/lang/String;");

    Program::new(vec![
        Class::new(ty("LAnimal;"), None)
            .with_method(Method::new(ty("LAnimal;"), "speak", void.clone(), vec![])),
        Class::new(ty("LPet;"), None)
            .with_flags(ClassFlags::INTERFACE | ClassFlags::ABSTRACT)
            .with_method(
                Method::new(ty("LPet;"), "name", string.clone(), vec![])
                    .with_flags(MethodFlags::ABSTRACT),
            ),
        Class::new(ty("LDog;"), Some(ty("LAnimal;")))
            .implements(ty("LPet;"))
            .with_method(Method::new(ty("LDog;"), "speak", void, vec![]))
            .with_method(Method::new(ty("LDog;"), "name", string.clone(), vec![])),
        Class::new(ty("LPuppy;"), Some(ty("LDog;")))
            .with_method(Method::new(ty("LPuppy;"), "name", string.clone(), vec![])),
        Class::new(ty("LCat;"), Some(ty("LAnimal;")))
            .implements(ty("LPet;"))
            .with_method(Method::new(ty("LCat;"), "name", string, vec![])),
    ])
}

// Looks up the method a class itself declares
pub fn method_of(index: &HierarchyIndex, class: &str, method_ref: &MethodRef) -> MethodRc {
    index
        .definition(&ty(class))
        .and_then(|c| c.find_virtual(method_ref))
        .cloned()
        .unwrap_or_else(|| panic!("{class} does not declare {method_ref}"))
}

// An instruction inside a method declared by `class`
pub fn caller_in(class: &str) -> Instruction {
    Instruction::new(
        Arc::new(Method::new(ty(class), "caller", ty("V"), vec![])),
        0x10,
    )
}
